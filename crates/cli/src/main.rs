use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formwright_engine::{FieldEnvironment, LocaleTable, NoModel, classify};
use formwright_types::FieldKind;
use formwright_util::{FormConfig, expand_tilde};
use tracing::debug;

mod fixture;

use fixture::Fixture;

/// Preview how a form field resolves its label and options.
#[derive(Parser, Debug)]
#[command(name = "formwright", version, about)]
struct Cli {
    /// Extra locale files merged over the fixture's inline translations
    #[arg(long = "locale", global = true)]
    locale_files: Vec<PathBuf>,

    /// Form configuration file (defaults to FORMWRIGHT_CONFIG_PATH or the user config dir)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved label of the fixture's field
    Label { fixture: PathBuf },
    /// Print the fixture's field presentation, including its option list, as JSON
    Options { fixture: PathBuf },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => FormConfig::load_from(&expand_tilde(path)),
        None => FormConfig::load(),
    }
    .context("load form configuration")?;

    match &cli.command {
        Command::Label { fixture } => {
            let fixture = Fixture::load(fixture)?;
            println!("{}", resolve_label(&fixture, &config, &cli.locale_files)?);
        }
        Command::Options { fixture } => {
            let fixture = Fixture::load(fixture)?;
            println!("{}", present(&fixture, &config, &cli.locale_files)?);
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn environment<'a>(fixture: &'a Fixture, locales: &'a LocaleTable, config: &'a FormConfig) -> FieldEnvironment<'a> {
    match &fixture.model {
        Some(model) => FieldEnvironment::for_model(locales, config, model),
        None => FieldEnvironment::for_model(locales, config, &NoModel),
    }
}

fn resolve_label(fixture: &Fixture, config: &FormConfig, locale_files: &[PathBuf]) -> Result<String> {
    let locales = fixture.locale_table(locale_files)?;
    let environment = environment(fixture, &locales, config);
    let context = environment.contextualize(fixture.field.clone());
    Ok(environment.labels().resolve_label(&context))
}

fn present(fixture: &Fixture, config: &FormConfig, locale_files: &[PathBuf]) -> Result<String> {
    let locales = fixture.locale_table(locale_files)?;
    let environment = environment(fixture, &locales, config);
    let presentation = match fixture.field.kind() {
        FieldKind::Action(_) => environment.present_action(&fixture.field),
        FieldKind::Input => {
            let source = fixture
                .collection
                .as_ref()
                .map(|raw| classify(&fixture.field.field_name, raw))
                .transpose()?;
            debug!(field = %fixture.field.field_name, explicit_collection = source.is_some(), "presenting select");
            environment.present_select(&fixture.field, source, &fixture.select)?
        }
    };
    Ok(serde_json::to_string_pretty(&presentation)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECT_FIXTURE: &str = r#"
model:
  name: post
  lifecycle: persisted
  attributes:
    tool: hands
field:
  field_name: tool
  resource_name: post
collection: [[one, [pencil, crayon]], [two, [eyes, hands]]]
"#;

    #[test]
    fn presents_grouped_select_as_json() {
        let fixture = Fixture::parse(SELECT_FIXTURE).expect("parse fixture");
        let output = present(&fixture, &FormConfig::default(), &[]).expect("present");
        let value: serde_json::Value = serde_json::from_str(&output).expect("json output");
        assert_eq!(value["label"], "Tool");
        assert_eq!(value["body"]["kind"], "options");
        assert_eq!(value["body"]["collection"]["entries"].as_array().map(Vec::len), Some(4));
        assert_eq!(value["body"]["collection"]["entries"][3]["selected"], true);
    }

    #[test]
    fn labels_actions_without_a_model() {
        let fixture = Fixture::parse("field: { field_name: cancel, action: cancel, resource_name: search }\n").expect("parse fixture");
        assert_eq!(resolve_label(&fixture, &FormConfig::default(), &[]).expect("label"), "Cancel Search");
    }
}
