use std::path::{Path, PathBuf};

/// How the image file of a chart is named.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputName {
    /// `<input-stem>.png`, next to the input unless an output directory is set.
    InputStem,
    /// `<title with spaces replaced>.png`.
    Title,
    /// A literal file name.
    Fixed(String),
}

impl OutputName {
    /// Resolves the image path for a chart read from `input` with `title`.
    pub fn resolve(&self, input: &Path, title: &str, output_dir: Option<&Path>) -> PathBuf {
        match self {
            OutputName::InputStem => {
                let png = input.with_extension("png");
                match (output_dir, png.file_name()) {
                    (Some(dir), Some(name)) => dir.join(name),
                    _ => png,
                }
            }
            OutputName::Title => in_dir(output_dir, title_file_name(title)),
            OutputName::Fixed(name) => in_dir(output_dir, name.clone()),
        }
    }
}

/// `"Accesos IO"` becomes `"Accesos_IO.png"`. Path separators are flattened too
/// so a title never points into another directory.
pub fn title_file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{}.png", stem)
}

fn in_dir(output_dir: Option<&Path>, name: String) -> PathBuf {
    match output_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
