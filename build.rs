fn main() {
    // Host builds have nothing to generate; the ESP-IDF toolchain needs its
    // sysenv forwarded to the linker.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
