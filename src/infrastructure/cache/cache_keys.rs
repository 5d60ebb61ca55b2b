pub fn balance_report_key(group_id: &str) -> String {
    format!("balance_report:{}", group_id)
}
