//! Binary availability checks

/// Binaries from `binaries` that cannot be found on `PATH`, in input order.
pub fn missing_binaries<'a, I>(binaries: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    binaries
        .into_iter()
        .filter(|name| {
            let found = which::which(name).is_ok();
            if !found {
                tracing::warn!(binary = %name, "Binary not found on PATH");
            }
            !found
        })
        .map(str::to_string)
        .collect()
}
