use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    AuthResponse, CreateUserRequest, LoginRequest, MeResponse, MessageResponse, RegisterRequest,
    SessionUser, UpdateProfileRequest, UpdateRoleRequest, UserResponse, UserRole,
};
use crate::modules::blog::model::{Blog, BlogInput, BlogResponse, BlogsListResponse, SeoMeta};
use crate::modules::contact::model::{
    Contact, ContactInput, ContactResponse, ContactStatus, ContactsListResponse,
    UpdateContactStatusRequest,
};
use crate::modules::services::model::{
    CreatedResponse, Service, ServiceInput, ServiceResponse, ServicesListResponse,
};
use crate::modules::training::model::{
    Training, TrainingInput, TrainingResponse, TrainingsListResponse, UpdateStatusRequest,
};
use crate::utils::pagination::{CursorMeta, PageMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::session,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::update_profile,
        crate::modules::auth::controller::create_user,
        crate::modules::auth::controller::update_role,
        crate::modules::auth::controller::logout,
        crate::modules::services::controller::list_services,
        crate::modules::services::controller::get_service,
        crate::modules::services::controller::create_service,
        crate::modules::services::controller::update_service,
        crate::modules::services::controller::delete_service,
        crate::modules::blog::controller::list_blogs,
        crate::modules::blog::controller::get_blog,
        crate::modules::blog::controller::create_blog,
        crate::modules::blog::controller::update_blog,
        crate::modules::blog::controller::delete_blog,
        crate::modules::training::controller::list_trainings,
        crate::modules::training::controller::list_trainings_admin,
        crate::modules::training::controller::get_training,
        crate::modules::training::controller::get_training_admin,
        crate::modules::training::controller::list_trainings_by_category,
        crate::modules::training::controller::list_trainings_by_level,
        crate::modules::training::controller::create_training,
        crate::modules::training::controller::update_training,
        crate::modules::training::controller::update_training_status,
        crate::modules::training::controller::delete_training,
        crate::modules::training::controller::delete_training_permanent,
        crate::modules::contact::controller::submit_contact,
        crate::modules::contact::controller::list_contacts,
        crate::modules::contact::controller::get_contact,
        crate::modules::contact::controller::update_contact_status,
        crate::modules::contact::controller::delete_contact,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            SessionUser,
            RegisterRequest,
            CreateUserRequest,
            LoginRequest,
            UpdateProfileRequest,
            UpdateRoleRequest,
            AuthResponse,
            MeResponse,
            MessageResponse,
            ErrorResponse,
            Service,
            ServiceInput,
            ServiceResponse,
            ServicesListResponse,
            CreatedResponse,
            Blog,
            BlogInput,
            BlogResponse,
            BlogsListResponse,
            SeoMeta,
            Training,
            TrainingInput,
            TrainingResponse,
            TrainingsListResponse,
            UpdateStatusRequest,
            Contact,
            ContactStatus,
            ContactInput,
            ContactResponse,
            ContactsListResponse,
            UpdateContactStatusRequest,
            PageMeta,
            CursorMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Accounts, sessions and roles"),
        (name = "Services", description = "Service catalog"),
        (name = "Blog", description = "Blog posts"),
        (name = "Training", description = "Training courses"),
        (name = "Contact", description = "Contact form submissions")
    ),
    info(
        title = "Dran Backend API",
        version = "0.1.0",
        description = "REST API for the services catalog, blog, training library and contact form, with JWT-based authentication and role-based access control.",
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
