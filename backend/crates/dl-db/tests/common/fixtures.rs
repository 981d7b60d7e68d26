use dl_core::UserRecord;

pub fn user_record(username: &str, email: &str, uid: &str) -> UserRecord {
    UserRecord::for_password_signup(username, email, uid)
}
