//! `convert` command: semicolon-separated text to a JSON comment file.

use std::path::Path;

use ytsent_comments::{parse_semicolon_list, save_comments};

pub(crate) fn run_convert(input: &Path, output: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(input)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", input.display()))?;
    let comments = parse_semicolon_list(&raw);
    if comments.is_empty() {
        anyhow::bail!("no comments found in {}", input.display());
    }

    save_comments(output, &comments)?;
    println!(
        "Converted {} comments from {} to {}",
        comments.len(),
        input.display(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use ytsent_comments::load_comments;

    use super::*;

    #[test]
    fn converts_without_any_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("list.txt");
        let output = dir.path().join("list.json");
        std::fs::write(&input, "great video; \nnot for me;").unwrap();

        run_convert(&input, &output).unwrap();

        let comments = load_comments(&output).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].text, "not for me");
    }

    #[test]
    fn empty_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.txt");
        std::fs::write(&input, " ; ;").unwrap();

        let err = run_convert(&input, &dir.path().join("out.json")).unwrap_err();
        assert!(err.to_string().contains("no comments found"), "{err}");
    }
}
