pub mod visitor {
    /// Cron expression for the expired visitor sweep
    /// Runs daily at 02:00
    pub const CLEANUP_CRON_EXPRESSION: &str = "0 0 2 * * *";

    /// Cron expression for expiring visitor notices
    /// Runs daily at 09:00
    pub const EXPIRY_NOTICE_CRON_EXPRESSION: &str = "0 0 9 * * *";
}
