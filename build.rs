fn main() {
    // Embed version info from `[package.metadata.winres]` into the executable.
    #[cfg(windows)]
    winres::WindowsResource::new()
        .compile()
        .expect("Failed to compile Windows resources");
}
