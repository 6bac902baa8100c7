/// Removes the `count` leading components from `path`, the way `patch -pN`
/// does. Adjacent slashes count as one separator.
#[must_use]
pub fn strip_path_components(path: &str, count: u32) -> &str {
    let mut rest = path;
    for _ in 0..count {
        match rest.find('/') {
            Some(pos) => rest = rest[pos..].trim_start_matches('/'),
            None => break,
        }
    }
    rest
}

#[must_use]
pub fn strip_paths(paths: &[String], count: Option<u32>) -> Vec<String> {
    match count {
        Some(count) if count > 0 => paths
            .iter()
            .map(|p| strip_path_components(p, count).to_owned())
            .collect(),
        _ => paths.to_vec(),
    }
}
