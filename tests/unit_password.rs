use dran_backend::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_and_verify() {
    let hash = hash_password("correct horse battery staple").unwrap();
    assert_ne!(hash, "correct horse battery staple");
    assert!(verify_password("correct horse battery staple", &hash).unwrap());
}

#[test]
fn test_wrong_password_fails() {
    let hash = hash_password("password123").unwrap();
    assert!(!verify_password("password124", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let a = hash_password("password123").unwrap();
    let b = hash_password("password123").unwrap();
    assert_ne!(a, b);
}
