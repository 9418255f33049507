use swiftward_core::parse_swift_type;

/// Parses a Swift type string and prints its canonical rendering, or the
/// error with its column.
pub fn run(ty: &str) -> i32 {
    match parse_swift_type(ty) {
        Ok(parsed) => {
            println!("{}", parsed.normalized());
            0
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}
