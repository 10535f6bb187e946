/// Parse a worker count. Zero is rejected here even though the library
/// clamps it, so a typo on the command line does not pass silently.
pub fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a positive integer"))?;

    if value == 0 {
        return Err("Concurrency must be at least 1".to_string());
    }
    Ok(value)
}
