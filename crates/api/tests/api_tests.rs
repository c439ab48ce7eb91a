
mod handlers {
    mod bookings_test;
    mod config_test;
    mod members_test;
    mod middleware_test;
}
