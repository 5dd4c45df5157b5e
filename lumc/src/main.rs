use std::{
    collections::HashMap,
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use clap::Parser as ClapParser;
use lumcore::{
    base::{
        InstanceContext,
        api::{
            ApplicationInfo, InstanceCreateInfo, ModuleCompileInfo, ModuleSourceInfo,
            VersionInfo, create_instance,
        },
        meta::LumenMetaInfo,
    },
    compiler::compile_sources,
    diagnostics::{CollectingMessageCollector, CompilerMessage, CompilerMessageSeverity},
    ext::log::{LogCreateInfoEXT, LogLevelEXT, LogMessageEXT},
    utils::conf::ExtList,
};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Compile Lumen IR units with the enabled compiler plugins and print the
/// transformed modules.
#[derive(ClapParser)]
#[command(name = "lumc", version)]
pub struct Arguments {
    /// Units to compile
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Modules providing symbols to the units, never transformed
    #[arg(long = "dep")]
    deps: Vec<PathBuf>,

    /// Language version reported by the front end
    #[arg(long, default_value = "2.0.0")]
    language_version: semver::Version,

    /// Path to the meta configuration (defaults to $LUMEN_CONFIG_PATH or the
    /// user configuration directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only print the summary
    #[arg(long, short)]
    quiet: bool,
}

fn level_color(level: LogLevelEXT) -> Color {
    match level {
        LogLevelEXT::Trace | LogLevelEXT::Debug => Color::Blue,
        LogLevelEXT::Info => Color::Green,
        LogLevelEXT::Warn => Color::Yellow,
        LogLevelEXT::Error => Color::Red,
    }
}

fn print_log(_instance: &InstanceContext, msg: LogMessageEXT) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(level_color(msg.level))));
    let _ = write!(stderr, "[{:?}]", msg.level);
    let _ = stderr.reset();
    let _ = writeln!(
        stderr,
        " {} {}: {}",
        msg.timepoint.format("%H:%M:%S%.3f"),
        msg.module,
        msg.message
    );
}

fn version_info(version: &semver::Version) -> Option<VersionInfo> {
    Some(VersionInfo::new(
        u16::try_from(version.major).ok()?,
        u16::try_from(version.minor).ok()?,
        u16::try_from(version.patch).ok()?,
    ))
}

fn read_sources(
    paths: &[PathBuf],
    texts: &mut HashMap<String, String>,
) -> Result<Vec<ModuleSourceInfo>, String> {
    paths
        .iter()
        .map(|path| {
            let data = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read `{}`: {}", path.display(), e))?;
            let filename = path.display().to_string();
            texts.insert(filename.clone(), data.clone());
            Ok(ModuleSourceInfo::text(Some(&filename), data))
        })
        .collect()
}

fn render_message(message: &CompilerMessage, texts: &HashMap<String, String>) {
    let kind = match message.severity {
        CompilerMessageSeverity::Error => ReportKind::Error,
        CompilerMessageSeverity::Warning => ReportKind::Warning,
        CompilerMessageSeverity::Info => ReportKind::Advice,
    };

    let located = message.location.as_ref().and_then(|location| {
        let file = location.file.clone()?;
        let text = texts.get(&file)?;
        Some((file, location.start..location.end, text))
    });

    match located {
        Some((file, range, text)) => {
            let mut colors = ColorGenerator::new();
            let span = (file.clone(), range);
            let result = Report::build(kind, span.clone())
                .with_message(&message.message)
                .with_label(
                    Label::new(span)
                        .with_message("reported here")
                        .with_color(colors.next()),
                )
                .finish()
                .eprint((file, Source::from(text.as_str())));
            if result.is_err() {
                eprintln!("{}", message);
            }
        }
        None => {
            let mut stderr = StandardStream::stderr(ColorChoice::Auto);
            let color = match message.severity {
                CompilerMessageSeverity::Error => Color::Red,
                CompilerMessageSeverity::Warning => Color::Yellow,
                CompilerMessageSeverity::Info => Color::Cyan,
            };
            let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
            let _ = write!(stderr, "{}", message.severity);
            let _ = stderr.reset();
            let _ = writeln!(stderr, ": {}", message.message);
        }
    }
}

fn load_meta(config: Option<&Path>) -> Result<LumenMetaInfo, String> {
    match config {
        Some(path) => LumenMetaInfo::load_from_toml(path),
        None => LumenMetaInfo::load_default(),
    }
    .map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let args = Arguments::parse();

    let meta = match load_meta(args.config.as_deref()) {
        Ok(meta) => meta,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let Some(language_version) = version_info(&args.language_version) else {
        eprintln!("Error: language version {} is out of range", args.language_version);
        return ExitCode::from(2);
    };

    let mut ext = ExtList::new();
    ext.push(LogCreateInfoEXT {
        level: meta.log_level,
        callback: Box::new(print_log),
    });

    let instance = match create_instance(InstanceCreateInfo {
        application_info: ApplicationInfo {
            application_version: VersionInfo::new(0, 1, 1),
            application_name: "lumc".to_string(),
            engine_version: VersionInfo::new(0, 1, 1),
            engine_name: "lumen".to_string(),
        },
        enabled_extensions: meta.enabled_plugins(),
        ext,
    }) {
        Ok(instance) => instance,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut texts = HashMap::new();
    let sources = read_sources(&args.inputs, &mut texts);
    let dependencies = read_sources(&args.deps, &mut texts);
    let (sources, dependencies) = match (sources, dependencies) {
        (Ok(sources), Ok(dependencies)) => (sources, dependencies),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let messages = Arc::new(CollectingMessageCollector::new());
    let result = compile_sources(
        &instance,
        ModuleCompileInfo {
            sources,
            dependencies,
            language_version,
        },
        messages.clone(),
    );

    for message in messages.messages() {
        render_message(&message, &texts);
    }

    match result {
        Ok(unit) => {
            if !args.quiet {
                for (filename, module) in unit.filenames.iter().zip(&unit.modules) {
                    println!("// {}\n{}", filename, module);
                }
            }

            let mut stdout = StandardStream::stdout(ColorChoice::Auto);
            let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
            let _ = write!(stdout, "Compiled");
            let _ = stdout.reset();
            let _ = writeln!(
                stdout,
                " {} unit(s), instrumented {} screen(s): {}",
                unit.modules.len(),
                unit.transformed.len(),
                unit.transformed.join(", ")
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            if messages.errors().is_empty() {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}
