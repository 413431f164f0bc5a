//! `fairdraw draw` — run a draw and publish the result record.

use std::path::{Path, PathBuf};

use fairdraw_core::{
    ResultRecord, Sha256Hasher, draw, load_definition, results_path, summary, winner_lines,
    write_record,
};

use super::fail;

pub struct DrawCommandConfig<'a> {
    pub input: &'a Path,
    pub output: Option<&'a Path>,
    pub pretty: bool,
    pub summary: bool,
}

/// Run the draw command.
pub fn run(config: &DrawCommandConfig<'_>) {
    match execute(config) {
        Ok((record, output)) => {
            if config.summary {
                print!("{}", summary(&record));
                println!();
            }
            for line in winner_lines(&record) {
                println!("{line}");
            }
            println!();
            println!("Results written to {}", output.display());
        }
        Err(e) => fail(&e),
    }
}

/// Load, draw and write. Nothing is written unless the whole draw succeeds.
pub fn execute(config: &DrawCommandConfig<'_>) -> fairdraw_core::Result<(ResultRecord, PathBuf)> {
    let definition = load_definition(config.input)?;
    let record = draw(&Sha256Hasher, definition)?;
    let output = config
        .output
        .map_or_else(|| results_path(config.input), Path::to_path_buf);
    write_record(&record, &output, config.pretty)?;
    Ok((record, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairdraw_core::RaffleError;

    const SCENARIO: &str = r#"{"time":"2024-01-01T00:00:00Z","name":"test","count":2,"dice":"ABC","salt":"DEF","entrants":["a@x.com","b@x.com","c@x.com"]}"#;

    #[test]
    fn test_execute_writes_default_path() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("raffle.json");
        std::fs::write(&input, SCENARIO).unwrap();

        let (record, output) = execute(&DrawCommandConfig {
            input: &input,
            output: None,
            pretty: false,
            summary: false,
        })
        .unwrap();

        assert_eq!(output, tmp.path().join("raffle.json.results.json"));
        assert!(output.exists());
        assert_eq!(record.allocation().total(), 2);
    }

    #[test]
    fn test_execute_honours_output_override() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("raffle.json");
        let custom = tmp.path().join("published.json");
        std::fs::write(&input, SCENARIO).unwrap();

        let (_, output) = execute(&DrawCommandConfig {
            input: &input,
            output: Some(&custom),
            pretty: true,
            summary: false,
        })
        .unwrap();

        assert_eq!(output, custom);
        assert!(!tmp.path().join("raffle.json.results.json").exists());
        let text = std::fs::read_to_string(&custom).unwrap();
        assert!(text.contains("\n  \"key\""));
    }

    #[test]
    fn test_execute_invalid_definition_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("raffle.json");
        std::fs::write(&input, r#"{"name":"n"}"#).unwrap();

        let err = execute(&DrawCommandConfig {
            input: &input,
            output: None,
            pretty: false,
            summary: false,
        })
        .unwrap_err();

        assert!(matches!(
            err,
            RaffleError::InvalidDefinition { field: "time", .. }
        ));
        assert!(!results_path(&input).exists());
    }
}
