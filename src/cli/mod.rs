// src/cli/mod.rs
//! Command-line front end. Each command builds a fresh session, feeds it the
//! user's inputs and drives the workflow controller.

pub mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

use crate::config::AppConfig;
use crate::core::{
    FsOps, ResumeFile, ResumeFormat, ServiceClient, SessionStore, WorkflowController,
    WorkflowError,
};

const MARKDOWN_FILE_NAME: &str = "tailored_resume.md";

#[derive(Parser)]
#[command(name = "resume-tailor")]
#[command(about = "Score a resume against a job description and tailor it with the resume service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML config file (defaults to ./resume-tailor.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the resume service
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Model identifier passed to the service
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Allow the tailoring step to go beyond what the resume states
    #[arg(long, global = true)]
    pub no_strict: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that the resume service is reachable
    Health,
    /// Extract text from a PDF/DOCX resume
    Parse {
        resume: PathBuf,
        /// Write the text here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compute the ATS score of a resume for a job description
    Score {
        /// PDF/DOCX to parse, or a text file used as-is
        #[arg(long)]
        resume: PathBuf,
        /// Job description text file, `-` for stdin
        #[arg(long)]
        job: PathBuf,
    },
    /// Rewrite a resume for a job description
    Tailor {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        job: PathBuf,
        /// Save the tailored markdown
        #[arg(long)]
        output: Option<PathBuf>,
        /// Render and save the tailored resume as a document
        #[arg(long)]
        docx: Option<PathBuf>,
    },
    /// Parse, score, tailor and download in one go
    Run {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        job: PathBuf,
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
    },
}

impl Cli {
    /// Config file and environment, then the flags given on the command line.
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(url) = &self.service_url {
            config = config.with_service_url(url.clone());
        }
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if self.no_strict {
            config = config.with_strict_mode(false);
        }
        Ok(config)
    }
}

type Controller = WorkflowController<ServiceClient>;

fn build_controller(config: &AppConfig) -> Result<Controller> {
    let store = Arc::new(SessionStore::new(config.analysis_config()));
    let client = ServiceClient::new(config.service_url.clone())?;
    Ok(WorkflowController::new(store, client))
}

/// Select and parse a PDF/DOCX, or take any other file as already-extracted text.
async fn load_resume(controller: &Controller, path: &Path) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    if ResumeFormat::from_file_name(file_name).is_some() {
        let file = ResumeFile::from_path(path).await?;
        controller.store().select_file(file);
        controller.parse_resume().await?;
    } else {
        let text = FsOps::read_file_safe(path).await?;
        app_log!(info, "Using {} as resume text", path.display());
        controller.store().set_resume_text(text);
    }
    Ok(())
}

async fn load_job_description(controller: &Controller, path: &Path) -> Result<()> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read job description from stdin")?;
        buf
    } else {
        FsOps::read_file_safe(path).await?
    };
    controller.store().set_job_description(text);
    Ok(())
}

fn print_ats(controller: &Controller) {
    if let Some(out) = render::format_ats(&controller.store().snapshot()) {
        println!("{}", out);
    }
}

fn print_tailored(controller: &Controller) {
    if let Some(out) = render::format_tailored(&controller.store().snapshot()) {
        println!("{}", out);
    }
}

async fn save_document(controller: &Controller, target: &Path) -> Result<()> {
    let artifact = controller.download_tailored().await?;
    let path = FsOps::save_artifact(&artifact, target).await?;
    println!("✓ Saved document to {}", path.display());
    Ok(())
}

pub async fn handle_command(command: Command, config: AppConfig) -> Result<()> {
    app_log!(
        info,
        "Resume service: {} (model {}, strict {})",
        config.service_url,
        config.model,
        config.strict_mode
    );

    if let Command::Health = command {
        let client = ServiceClient::new(config.service_url.clone())?;
        let status = client.health().await?;
        println!("✓ Resume service at {} is {}", client.base_url(), status);
        return Ok(());
    }

    let controller = build_controller(&config)?;
    let reporter = render::spawn_status_reporter(controller.store());
    let outcome = run_command(&controller, command).await;
    reporter.abort();
    outcome
}

async fn run_command(controller: &Controller, command: Command) -> Result<()> {
    match command {
        Command::Health => Ok(()),

        Command::Parse { resume, output } => {
            let file = ResumeFile::from_path(&resume).await?;
            controller.store().select_file(file);
            let text = controller.parse_resume().await?;

            match output {
                Some(path) => {
                    FsOps::write_file_safe(&path, &text).await?;
                    println!("✓ Resume text written to {}", path.display());
                }
                None => println!("{}", text),
            }
            Ok(())
        }

        Command::Score { resume, job } => {
            load_resume(controller, &resume).await?;
            load_job_description(controller, &job).await?;
            controller.score_against_job().await?;
            print_ats(controller);
            Ok(())
        }

        Command::Tailor {
            resume,
            job,
            output,
            docx,
        } => {
            load_resume(controller, &resume).await?;
            load_job_description(controller, &job).await?;
            let tailored = controller.tailor_for_job().await?;
            print_tailored(controller);

            if let Some(path) = output {
                FsOps::write_file_safe(&path, &tailored.markdown).await?;
                println!("✓ Tailored markdown written to {}", path.display());
            }
            if let Some(path) = docx {
                save_document(controller, &path).await?;
            }
            Ok(())
        }

        Command::Run {
            resume,
            job,
            out_dir,
        } => {
            load_resume(controller, &resume).await?;
            load_job_description(controller, &job).await?;

            // A failed score does not block tailoring
            match controller.score_against_job().await {
                Ok(_) => print_ats(controller),
                Err(e @ WorkflowError::Remote { .. }) => eprintln!("⚠️  {}", e),
                Err(e) => return Err(e.into()),
            }

            let tailored = controller.tailor_for_job().await?;
            print_tailored(controller);

            FsOps::ensure_dir_exists(&out_dir).await?;
            let markdown_path = out_dir.join(MARKDOWN_FILE_NAME);
            FsOps::write_file_safe(&markdown_path, &tailored.markdown).await?;
            println!("✓ Tailored markdown written to {}", markdown_path.display());

            save_document(controller, &out_dir).await
        }
    }
}
