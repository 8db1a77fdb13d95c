use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use duet_serve::{
    DialogueInput, MonologueInput, ServerConfig, SynthesisOutcome, dialogue_synthesis,
    monologue_synthesis, prepare_dialogue, prepare_monologue, serve,
};
use duet_speech::providers::remote::{RemoteTTS, RemoteTTSConfig};
use duet_speech::{PromptAudio, SpeechResponse, VoiceMode, encode_wav};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "duet")]
#[command(about = "Duet - Dialogue and monologue speech generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the model worker lives and what it should load
#[derive(Args, Debug, Clone)]
struct BackendArgs {
    /// Directory containing the pretrained model assets
    #[arg(long)]
    pretrained_dir: PathBuf,

    /// Base URL of the model worker
    #[arg(long, default_value = "http://127.0.0.1:9880")]
    backend_url: String,

    /// Device the worker loads the model on
    #[arg(long, default_value = "cuda")]
    device: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 600)]
    timeout_secs: u64,
}

impl BackendArgs {
    fn remote_config(&self) -> RemoteTTSConfig {
        RemoteTTSConfig::new(&self.backend_url, &self.pretrained_dir)
            .with_device(&self.device)
            .with_timeout_secs(self.timeout_secs)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the browser demo over HTTP
    Serve {
        #[command(flatten)]
        backend: BackendArgs,

        /// Accept requests from other origins
        #[arg(long)]
        share: bool,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        server_name: String,

        /// Port to bind to
        #[arg(long, default_value_t = 7860)]
        server_port: u16,
    },
    /// Generate a multi-speaker dialogue into a WAV file
    Dialogue {
        #[command(flatten)]
        backend: BackendArgs,

        /// Dialogue script, e.g. "[S1]Hello.[S2]Hi there."
        #[arg(short, long)]
        text: String,

        /// voice-clone or random-voice
        #[arg(long, default_value = "voice-clone")]
        voice_mode: VoiceMode,

        #[arg(long)]
        spk1_prompt_audio: Option<PathBuf>,

        #[arg(long, default_value = "")]
        spk1_prompt_text: String,

        #[arg(long)]
        spk2_prompt_audio: Option<PathBuf>,

        #[arg(long, default_value = "")]
        spk2_prompt_text: String,

        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Generate a single-speaker monologue into a WAV file
    Monologue {
        #[command(flatten)]
        backend: BackendArgs,

        /// Text to speak
        #[arg(short, long)]
        text: String,

        /// voice-clone or random-voice
        #[arg(long, default_value = "voice-clone")]
        voice_mode: VoiceMode,

        #[arg(long)]
        prompt_audio: Option<PathBuf>,

        #[arg(long, default_value = "")]
        prompt_text: String,

        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            backend,
            share,
            server_name,
            server_port,
        } => {
            let config = ServerConfig {
                host: server_name,
                port: server_port,
                share,
            };
            run_server(backend, config).await?;
        }
        Commands::Dialogue {
            backend,
            text,
            voice_mode,
            spk1_prompt_audio,
            spk1_prompt_text,
            spk2_prompt_audio,
            spk2_prompt_text,
            output,
        } => {
            let input = DialogueInput {
                target_text: text,
                voice_mode,
                spk1_prompt_text,
                spk1_prompt_audio: read_prompt_audio(spk1_prompt_audio.as_deref())?,
                spk2_prompt_text,
                spk2_prompt_audio: read_prompt_audio(spk2_prompt_audio.as_deref())?,
            };
            generate_dialogue(backend, input, &output).await?;
        }
        Commands::Monologue {
            backend,
            text,
            voice_mode,
            prompt_audio,
            prompt_text,
            output,
        } => {
            let input = MonologueInput {
                text,
                voice_mode,
                prompt_audio: read_prompt_audio(prompt_audio.as_deref())?,
                prompt_text,
            };
            generate_monologue(backend, input, &output).await?;
        }
    }

    Ok(())
}

async fn run_server(backend: BackendArgs, config: ServerConfig) -> Result<()> {
    log::info!(
        "Loading model from {} via worker at {}",
        backend.pretrained_dir.display(),
        backend.backend_url
    );

    let provider = RemoteTTS::connect(backend.remote_config())
        .await
        .context("Failed to load the model on the worker")?;

    serve(config, Arc::new(provider)).await?;
    Ok(())
}

async fn generate_dialogue(backend: BackendArgs, input: DialogueInput, output: &Path) -> Result<()> {
    // Reject bad input before paying for a model load
    if let Err(rejection) = prepare_dialogue(input.clone()) {
        anyhow::bail!("{}", rejection);
    }

    let provider = RemoteTTS::connect(backend.remote_config())
        .await
        .context("Failed to load the model on the worker")?;

    let outcome = dialogue_synthesis(&provider, input).await?;
    write_outcome(outcome, output)
}

async fn generate_monologue(
    backend: BackendArgs,
    input: MonologueInput,
    output: &Path,
) -> Result<()> {
    if let Err(rejection) = prepare_monologue(input.clone()) {
        anyhow::bail!("{}", rejection);
    }

    let provider = RemoteTTS::connect(backend.remote_config())
        .await
        .context("Failed to load the model on the worker")?;

    let outcome = monologue_synthesis(&provider, input).await?;
    write_outcome(outcome, output)
}

fn read_prompt_audio(path: Option<&Path>) -> Result<Option<PromptAudio>> {
    path.map(|path| {
        PromptAudio::from_path(path)
            .with_context(|| format!("Failed to read prompt audio {}", path.display()))
    })
    .transpose()
}

fn write_outcome(outcome: SynthesisOutcome, output: &Path) -> Result<()> {
    match outcome {
        SynthesisOutcome::Generated(response) => write_wav(&response, output),
        SynthesisOutcome::Rejected(rejection) => anyhow::bail!("{}", rejection),
    }
}

fn write_wav(response: &SpeechResponse, output: &Path) -> Result<()> {
    let wav = encode_wav(&response.audio)?;
    std::fs::write(output, wav)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {} ({:.2}s at {} Hz)",
        output.display(),
        response.duration_ms as f64 / 1000.0,
        response.audio.sample_rate
    );
    Ok(())
}
