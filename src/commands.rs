use crate::cli::{Cli, Commands};
use crate::commit::explain::{DiffExplanation, explain_diff, staged_diff};
use crate::commit::{CommitError, CommitSynthesizer, GitContext, SynthesisOutcome};
use crate::config::Config;
use crate::error::AppResult;
use crate::exec::ShellExecutor;
use crate::generate::{generate_code, normalize_language, write_output};
use crate::git::{GitCollaborator, Repository};
use crate::llm::{ChatClient, LLMClient};
use crate::logger;
use crate::shell::dispatcher::RAW_COMMAND_PREFIX;
use crate::shell::{DispatcherConfig, HistoryLog, RustylineReader, ShellDispatcher, ShellHelper};
use crate::ui::{Console, cli_help_text, help_text};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Load config, start logging, and run the selected command
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    logger::init(cli.log_level.as_deref(), Some(&config.logging.level));
    debug!("loaded config: endpoint={} model={}", config.llm.endpoint, config.llm.model);

    let mut console = Console::stdout();

    match cli.command {
        Some(Commands::Ask { prompt }) => {
            let client = build_client(&config)?;
            handle_ask(&client, &prompt.join(" "), &mut console).await
        }
        Some(Commands::Gen { language, output, description }) => {
            let client = build_client(&config)?;
            handle_gen(&client, &language, output.as_deref(), &description.join(" "), &mut console).await
        }
        Some(Commands::Diff) => {
            let client = build_client(&config)?;
            let repo = Repository::current()?;
            handle_diff(&client, &repo, &mut console).await
        }
        Some(Commands::Commit { commit }) => {
            let client = build_client(&config)?;
            let repo = Repository::current()?;
            handle_commit(&config, &client, &repo, commit, cli.verbose, &mut console).await
        }
        Some(Commands::Shell) => {
            let client = build_client(&config)?;
            handle_shell(&config, &client).await
        }
        None if cli.query.is_empty() => handle_welcome(&mut console),
        None => {
            let client = build_client(&config)?;
            handle_query(&config, &client, &cli.query.join(" "), console).await
        }
    }
}

pub fn build_client(config: &Config) -> AppResult<ChatClient> {
    Ok(ChatClient::new(&config.llm, config.get_api_key())?)
}

pub fn handle_welcome<W: Write>(console: &mut Console<W>) -> AppResult<()> {
    console.info("Welcome to shellmind! Here are some ways to use it:")?;
    console.plain("")?;
    console.plain(cli_help_text())?;
    console.plain("")?;
    console.plain(help_text(&DispatcherConfig::new("").builtins).trim_end())?;
    Ok(())
}

/// One-shot query, gated exactly like a line typed into the shell
pub async fn handle_query<W: Write>(
    config: &Config,
    client: &dyn LLMClient,
    line: &str,
    console: Console<W>,
) -> AppResult<()> {
    let dispatcher_config = DispatcherConfig::new(config.shell.prompt.clone());
    let executor = ShellExecutor::new();
    let mut dispatcher = ShellDispatcher::new(&dispatcher_config, client, &executor, console);

    let line = line.trim();
    match line.strip_prefix(RAW_COMMAND_PREFIX) {
        Some(command) => dispatcher.execute_gated(command.trim()),
        None => dispatcher.ask(line).await,
    }
}

pub async fn handle_ask<W: Write>(client: &dyn LLMClient, prompt: &str, console: &mut Console<W>) -> AppResult<()> {
    let response = client.ask(prompt).await?;
    console.info("AI Response:")?;
    console.plain(response.trim())?;
    Ok(())
}

pub async fn handle_gen<W: Write>(
    client: &dyn LLMClient,
    language: &str,
    output: Option<&Path>,
    description: &str,
    console: &mut Console<W>,
) -> AppResult<()> {
    let language = normalize_language(language);
    console.info(&format!("Generating {} code...", language))?;

    let code = generate_code(client, description, &language).await?;

    match output {
        None => console.plain(&code)?,
        Some(path) => {
            write_output(path, &code)?;
            console.success(&format!(
                "Successfully generated {} code in {}",
                language,
                path.display()
            ))?;
        }
    }

    Ok(())
}

pub async fn handle_diff<W: Write>(
    client: &dyn LLMClient,
    git: &dyn GitCollaborator,
    console: &mut Console<W>,
) -> AppResult<()> {
    if !git.is_repo() {
        return Err(CommitError::NotARepository.into());
    }

    let diff = staged_diff(git)?;
    match explain_diff(client, diff.as_deref()).await? {
        DiffExplanation::NoChanges => console.warning(DiffExplanation::NoChanges.text())?,
        DiffExplanation::Explained(text) => {
            console.info("Changes explanation:")?;
            console.plain(&text)?;
        }
    }

    Ok(())
}

pub async fn handle_commit<W: Write>(
    config: &Config,
    client: &dyn LLMClient,
    git: &dyn GitCollaborator,
    apply: bool,
    verbose: bool,
    console: &mut Console<W>,
) -> AppResult<()> {
    let context = GitContext::gather(git)?;
    console.info("Generating commit message...")?;

    let synthesizer = CommitSynthesizer::with_max_attempts(client, config.commit.max_attempts);
    let outcome = synthesizer.synthesize(&context).await?;

    if verbose {
        print_attempts(&outcome, console)?;
    }

    console.success("Generated commit message:")?;
    console.plain(&outcome.message)?;

    if apply {
        git.commit(&outcome.message)?;
        console.success("Changes committed.")?;
    } else {
        console.info("Run with --commit to apply it.")?;
    }

    Ok(())
}

fn print_attempts<W: Write>(outcome: &SynthesisOutcome, console: &mut Console<W>) -> AppResult<()> {
    for attempt in &outcome.attempts {
        let verdict = if attempt.valid { "valid" } else { "rejected" };
        console.plain(&format!("attempt {}: {} ({})", attempt.attempt, attempt.candidate.header, verdict))?;
    }
    if outcome.repaired {
        console.warning("Message was repaired after the last attempt.")?;
    }
    Ok(())
}

pub async fn handle_shell(config: &Config, client: &dyn LLMClient) -> AppResult<()> {
    let dispatcher_config = DispatcherConfig::new(config.shell.prompt.clone());
    let executor = ShellExecutor::new();

    let history = config.history_path().and_then(|path| match HistoryLog::with_path(&path) {
        Ok(log) => Some(log),
        Err(e) => {
            warn!("history disabled, cannot use {}: {}", path.display(), e);
            None
        }
    });

    let mut reader = RustylineReader::new(ShellHelper::new(dispatcher_config.builtins.names()))?;
    if let Some(ref history) = history {
        match history.read() {
            Ok(entries) => reader.load_history(&entries),
            Err(e) => warn!("could not load history: {}", e),
        }
    }

    let mut console = Console::stdout();
    console.info("shellmind interactive shell. Type 'help' for commands, 'exit' to quit.")?;

    let mut dispatcher = ShellDispatcher::new(&dispatcher_config, client, &executor, console);
    dispatcher.run(&mut reader, history.as_ref()).await
}
