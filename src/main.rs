use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;

use scribe::cli::{CliArgs, CliCommand};
use scribe::config::EditorConfig;
use scribe::config_paths;
use scribe::editable::{markup, TextEdit};
use scribe::richtext::{FieldProps, RichTextEditor};
use scribe::script::{parse_script, ScriptRunner};

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok(text)
}

fn mount(props: FieldProps, config: &EditorConfig) -> RichTextEditor {
    RichTextEditor::with_config(props, config, |_| {})
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    scribe::tracing::init();

    let config = args.load_config().context("failed to load config")?;
    let props = args.field.to_props();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        CliCommand::Run { script } => {
            let text = match script {
                Some(path) => fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => read_stdin()?,
            };
            let steps = parse_script(&text)?;
            tracing::info!(steps = steps.len(), "running script");
            let mut runner = ScriptRunner::new(props, &config);
            runner.run(&steps, &mut out)?;
        }
        CliCommand::Show { json } => {
            let view = mount(props, &config).view();
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                write!(out, "{}", view.render())?;
            }
        }
        CliCommand::Formats { at, json } => {
            let mut editor = mount(props, &config);
            if let Some(selection) = at {
                editor.input(TextEdit::Select(*selection));
            }
            let formats = editor.active_formats();
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&formats)?)?;
            } else {
                let names: Vec<&str> = formats.active().map(|f| f.name()).collect();
                writeln!(out, "{}", names.join(" "))?;
            }
        }
        CliCommand::Normalize { markup: input } => {
            let input = match input {
                Some(text) => text.clone(),
                None => read_stdin()?,
            };
            let document = markup::parse(input.trim_end());
            writeln!(out, "{}", markup::serialize(&document))?;
            writeln!(out, "length: {}", document.plain_text_len())?;
        }
        CliCommand::InitConfig => {
            let path = match &args.config {
                Some(path) => path.clone(),
                None => config_paths::config_file().context("no config directory available")?,
            };
            if path.exists() {
                tracing::info!(path = %path.display(), "config already exists");
            } else {
                EditorConfig::default()
                    .save_to(&path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            writeln!(out, "{}", path.display())?;
        }
    }

    Ok(())
}
