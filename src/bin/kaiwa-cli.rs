// ABOUTME: Kaiwa CLI - command-line front end for analyzing learner Japanese
// ABOUTME: Analyzes messages, corrects sentences, estimates levels, and evaluates conversation files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors
//!
//! Usage:
//! ```bash
//! # Analyze one message against a target level
//! kaiwa-cli analyze "昨日、日本へ行きます。" --target N4 --latency-ms 4200
//!
//! # Correct a sentence with Vietnamese explanation
//! kaiwa-cli correct "日本へ行きたいですから勉強します"
//!
//! # Estimate the JLPT level of a text
//! kaiwa-cli estimate "会議の資料を準備しておきました。" --target N3
//!
//! # Evaluate a conversation stored as JSON
//! kaiwa-cli evaluate conversation.json --target N4
//! ```

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

use kaiwa_coach::config::ServerConfig;
use kaiwa_coach::database::{ConversationStore, InMemoryConversationStore};
use kaiwa_coach::errors::{AppError, AppResult};
use kaiwa_coach::logging::LoggingConfig;
use kaiwa_coach::models::{Conversation, ConversationMode, JlptLevel, ScoreValue};
use kaiwa_coach::services::{AnalyzeMessageRequest, EvaluationService};
use kaiwa_intelligence::AnalysisEngine;

#[derive(Parser)]
#[command(
    name = "kaiwa-cli",
    about = "Japanese learner proficiency analysis",
    long_about = "Analyze learner Japanese for grammar, particles, keigo, vocabulary, fluency, and JLPT level."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Intelligence configuration JSON file (overrides KAIWA_INTELLIGENCE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a single learner message
    Analyze {
        /// Message text
        text: String,

        /// Target JLPT level (N5..N1)
        #[arg(long)]
        target: Option<JlptLevel>,

        /// Conversation mode (speaking_practice, role_play, jlpt_exam, free_conversation)
        #[arg(long)]
        mode: Option<ConversationMode>,

        /// Response latency in milliseconds
        #[arg(long)]
        latency_ms: Option<f64>,
    },

    /// Correct a sentence and explain the change in Vietnamese
    Correct {
        /// Sentence to correct
        sentence: String,
    },

    /// Estimate the JLPT level of a text
    Estimate {
        /// Text to estimate
        text: String,

        /// Target JLPT level (N5..N1)
        #[arg(long)]
        target: Option<JlptLevel>,
    },

    /// Evaluate a conversation read from a JSON file
    Evaluate {
        /// Path to the conversation JSON
        file: PathBuf,

        /// Target JLPT level (defaults to the conversation's level)
        #[arg(long)]
        target: Option<JlptLevel>,
    },
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal("Failed to serialize output").with_source(e))?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    let mut server_config = ServerConfig::from_env()?;
    if cli.config.is_some() {
        server_config.intelligence_config_path = cli.config;
    }
    info!("{}", server_config.summary());

    let engine = Arc::new(AnalysisEngine::new(Arc::new(
        server_config.load_intelligence_config()?,
    ))?);
    let store = Arc::new(InMemoryConversationStore::new());
    let service = EvaluationService::new(
        Arc::clone(&engine),
        Arc::clone(&store) as Arc<dyn ConversationStore>,
        server_config.request_timeout,
    );

    match cli.command {
        Command::Analyze {
            text,
            target,
            mode,
            latency_ms,
        } => {
            let request = AnalyzeMessageRequest {
                text,
                target_level: target,
                mode,
                response_latency_ms: latency_ms.map(ScoreValue::Number),
            };
            print_json(&service.analyze_message(&request)?)?;
        }
        Command::Correct { sentence } => {
            print_json(&service.correct_sentence(&sentence).await?)?;
        }
        Command::Estimate { text, target } => {
            engine.ensure_japanese(&text)?;
            print_json(&engine.estimate_level(&text, target))?;
        }
        Command::Evaluate { file, target } => {
            let json = fs::read_to_string(&file).await.map_err(|e| {
                AppError::invalid_input(format!("Cannot read {}", file.display())).with_source(e)
            })?;
            let conversation: Conversation = serde_json::from_str(&json).map_err(|e| {
                AppError::invalid_input("Conversation file is not valid JSON").with_source(e)
            })?;
            let conversation_id = conversation.id.clone();
            let target = target.unwrap_or(conversation.level);
            store.save_conversation(conversation).await?;
            print_json(&service.evaluate(&conversation_id, target).await?)?;
        }
    }

    Ok(())
}
