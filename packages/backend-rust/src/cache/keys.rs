pub fn irt_state_key(user_id: &str) -> String {
    format!("irt:state:{}", user_id)
}
