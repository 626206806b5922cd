fn main() {
    // Only emit ESP-IDF link metadata when building the device firmware;
    // host-side test builds skip it.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
