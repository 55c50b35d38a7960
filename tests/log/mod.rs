mod log_history;
