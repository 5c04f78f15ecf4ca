// Interactive podcast generator menu
// Reads selections line by line and writes audio files under the output directory

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::action::MenuAction;
use crate::domain::tts::{Engine, OutputTarget, PodcastServiceApi, Prosody, TextRequest, Voice};

const POPULAR_VOICES: [&str; 6] = ["Joanna", "Matthew", "Amy", "Brian", "Emma", "Justin"];
const SAMPLE_VOICES: [&str; 4] = ["Joanna", "Matthew", "Amy", "Brian"];
const DEFAULT_SAMPLE_TEXT: &str =
    "Hello, this is a sample of my voice. How do you like the way I sound?";
const END_MARKER: &str = "END";

pub struct MenuController<R, W> {
    podcast_service: Arc<dyn PodcastServiceApi>,
    output_dir: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> MenuController<R, W> {
    pub fn new(
        podcast_service: Arc<dyn PodcastServiceApi>,
        output_dir: impl Into<PathBuf>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            podcast_service,
            output_dir: output_dir.into(),
            input,
            output,
        }
    }

    /// Main loop. Returns when the user exits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.display_menu()?;

            let Some(choice) = self.prompt("Select option: ")? else {
                writeln!(self.output, "\n\n👋 Goodbye!")?;
                break;
            };

            match MenuAction::parse(&choice) {
                Some(MenuAction::Exit) => {
                    writeln!(self.output, "\n👋 Goodbye!")?;
                    break;
                }
                Some(action) => {
                    if let Err(e) = self.dispatch(action).await {
                        tracing::warn!(error = %e, ?action, "Menu action failed");
                        writeln!(self.output, "\n❌ Error: {}", e)?;
                    }
                }
                None => writeln!(self.output, "\n❌ Invalid option!")?,
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::TypeText => self.text_input_mode(None).await,
            MenuAction::LoadFile => self.file_input_mode().await,
            MenuAction::ListVoices => self.list_voices_menu().await,
            MenuAction::GenerateSamples => self.sample_voices_mode().await,
            MenuAction::SsmlText => {
                let Some(prosody) = self.select_prosody()? else {
                    return Ok(());
                };
                self.text_input_mode(Some(prosody)).await
            }
            MenuAction::Exit => Ok(()),
        }
    }

    fn display_menu(&mut self) -> Result<()> {
        let rule = "=".repeat(60);
        writeln!(self.output, "\n{}", rule)?;
        writeln!(self.output, "  📻 TEXT-TO-SPEECH PODCAST GENERATOR")?;
        writeln!(self.output, "{}\n", rule)?;
        for action in MenuAction::ALL {
            writeln!(self.output, "{}. {}", action.key(), action.label())?;
        }
        writeln!(self.output, "\n{}", "-".repeat(60))?;
        Ok(())
    }

    /// Print a prompt and read one line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_number(&mut self, label: &str) -> Result<Option<usize>> {
        let Some(answer) = self.prompt(label)? else {
            return Ok(None);
        };
        match answer.trim().parse::<usize>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                writeln!(self.output, "Please enter a number!")?;
                Ok(None)
            }
        }
    }

    async fn text_input_mode(&mut self, prosody: Option<Prosody>) -> Result<()> {
        writeln!(
            self.output,
            "\n✍️  Enter your text (type '{}' on a new line when done):",
            END_MARKER
        )?;
        let mut lines = Vec::new();
        while let Some(line) = self.prompt("")? {
            if line.trim().eq_ignore_ascii_case(END_MARKER) {
                break;
            }
            lines.push(line);
        }

        let text = lines.join(" ");
        if text.trim().is_empty() {
            writeln!(self.output, "No text entered!")?;
            return Ok(());
        }

        let Some(voice) = self.select_voice().await? else {
            return Ok(());
        };
        let engine = self.select_engine(&voice)?;

        let default_path = self.output_dir.join("podcast.mp3");
        let Some(path) = self.select_output_path(&default_path)? else {
            return Ok(());
        };

        self.generate_audio(&text, &path, &voice, engine, prosody).await
    }

    async fn file_input_mode(&mut self) -> Result<()> {
        let Some(filepath) = self.prompt("\n📄 Enter file path: ")? else {
            return Ok(());
        };
        let filepath = PathBuf::from(filepath.trim());

        if !filepath.is_file() {
            writeln!(self.output, "File not found: {}", filepath.display())?;
            return Ok(());
        }

        let text = tokio::fs::read_to_string(&filepath).await?;
        writeln!(
            self.output,
            "✓ Loaded {} characters from {}",
            text.chars().count(),
            filepath.display()
        )?;

        let Some(voice) = self.select_voice().await? else {
            return Ok(());
        };
        let engine = self.select_engine(&voice)?;

        let stem = filepath
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "podcast".to_string());
        let default_path = self.output_dir.join(format!("{}_podcast.mp3", stem));
        let Some(path) = self.select_output_path(&default_path)? else {
            return Ok(());
        };

        self.generate_audio(&text, &path, &voice, engine, None).await
    }

    async fn list_voices_menu(&mut self) -> Result<()> {
        let voices = self.podcast_service.list_voices().await?;
        if voices.is_empty() {
            writeln!(self.output, "No voices available.")?;
            return Ok(());
        }

        writeln!(self.output, "\n📋 Available Languages:")?;
        let languages: Vec<&String> = voices.keys().collect();
        for (i, language) in languages.iter().enumerate() {
            let count = voices[*language].len();
            writeln!(self.output, "{}. {} ({} voices)", i + 1, language, count)?;
        }

        let Some(choice) = self.prompt_number("\nSelect language (number): ")? else {
            return Ok(());
        };
        let Some(language) = choice.checked_sub(1).and_then(|i| languages.get(i)) else {
            writeln!(self.output, "Invalid choice!")?;
            return Ok(());
        };

        writeln!(self.output, "\n🎙️  Voices for {}:", language)?;
        for (i, voice) in voices[*language].iter().enumerate() {
            let engine = if voice.supports(Engine::Neural) {
                "Neural ⚡"
            } else {
                "Standard"
            };
            writeln!(
                self.output,
                "{}. {:15} | {:7} | {}",
                i + 1,
                voice.name,
                voice.gender,
                engine
            )?;
        }
        Ok(())
    }

    async fn sample_voices_mode(&mut self) -> Result<()> {
        let Some(answer) = self.prompt("\nEnter sample text (or press Enter for default): ")?
        else {
            return Ok(());
        };
        let text = match answer.trim() {
            "" => DEFAULT_SAMPLE_TEXT.to_string(),
            custom => custom.to_string(),
        };

        writeln!(
            self.output,
            "\n🎵 Generating samples for {} voices...",
            SAMPLE_VOICES.len()
        )?;

        for name in SAMPLE_VOICES {
            let voice = match self.podcast_service.find_voice(name).await {
                Ok(Some(voice)) => voice,
                Ok(None) => {
                    writeln!(self.output, "Voice {} is not available, skipping", name)?;
                    continue;
                }
                Err(e) => {
                    writeln!(self.output, "\n❌ Error: {}", e)?;
                    continue;
                }
            };
            let path = self
                .output_dir
                .join(format!("sample_{}.mp3", name.to_lowercase()));
            self.generate_audio(&text, &path, &voice, Engine::Neural, None)
                .await?;
        }
        Ok(())
    }

    async fn select_voice(&mut self) -> Result<Option<Voice>> {
        writeln!(self.output, "\n🎙️  SELECT VOICE:")?;
        writeln!(self.output, "\nPopular Voices:")?;
        for (i, name) in POPULAR_VOICES.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, name)?;
        }
        writeln!(self.output, "{}. See all voices", POPULAR_VOICES.len() + 1)?;

        let Some(choice) = self.prompt_number("\nYour choice: ")? else {
            return Ok(None);
        };

        if (1..=POPULAR_VOICES.len()).contains(&choice) {
            let name = POPULAR_VOICES[choice - 1];
            let voice = self.podcast_service.find_voice(name).await?;
            if voice.is_none() {
                writeln!(self.output, "Voice {} is not available in this region!", name)?;
            }
            Ok(voice)
        } else if choice == POPULAR_VOICES.len() + 1 {
            self.select_from_all_voices().await
        } else {
            writeln!(self.output, "Invalid choice!")?;
            Ok(None)
        }
    }

    async fn select_from_all_voices(&mut self) -> Result<Option<Voice>> {
        let all_voices: Vec<Voice> = self
            .podcast_service
            .list_voices()
            .await?
            .into_values()
            .flatten()
            .collect();

        writeln!(self.output, "\nAll Available Voices:")?;
        for (i, voice) in all_voices.iter().enumerate() {
            writeln!(
                self.output,
                "{}. {:15} | {:10} | {}",
                i + 1,
                voice.name,
                voice.language_code,
                voice.gender
            )?;
        }

        let Some(choice) = self.prompt_number("\nSelect voice number: ")? else {
            return Ok(None);
        };
        match choice.checked_sub(1).and_then(|i| all_voices.get(i)) {
            Some(voice) => Ok(Some(voice.clone())),
            None => {
                writeln!(self.output, "Invalid choice!")?;
                Ok(None)
            }
        }
    }

    /// Ask only when the voice offers both engines; neural is the default
    fn select_engine(&mut self, voice: &Voice) -> Result<Engine> {
        if !(voice.supports(Engine::Neural) && voice.supports(Engine::Standard)) {
            return Ok(voice.preferred_engine());
        }

        writeln!(self.output, "\nEngine:")?;
        writeln!(self.output, "1. Neural (more natural, recommended)")?;
        writeln!(self.output, "2. Standard")?;
        let answer = self.prompt("Your choice (default: 1): ")?.unwrap_or_default();
        Ok(match answer.trim() {
            "2" => Engine::Standard,
            _ => Engine::Neural,
        })
    }

    fn select_prosody(&mut self) -> Result<Option<Prosody>> {
        writeln!(self.output, "\n🎛️  SSML prosody")?;
        let Some(rate) =
            self.prompt("Rate (x-slow, slow, medium, fast, x-fast) [medium]: ")?
        else {
            return Ok(None);
        };
        let Some(pitch) =
            self.prompt("Pitch (x-low, low, medium, high, x-high) [medium]: ")?
        else {
            return Ok(None);
        };

        match (rate.parse(), pitch.parse()) {
            (Ok(rate), Ok(pitch)) => Ok(Some(Prosody { rate, pitch })),
            (Err(e), _) | (_, Err(e)) => {
                writeln!(self.output, "{}", e)?;
                Ok(None)
            }
        }
    }

    fn select_output_path(&mut self, default_path: &Path) -> Result<Option<PathBuf>> {
        let Some(answer) = self.prompt(&format!(
            "\nOutput filename (default: {}): ",
            default_path.display()
        ))?
        else {
            return Ok(None);
        };

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(Some(default_path.to_path_buf()));
        }
        if answer.ends_with(".mp3") {
            Ok(Some(PathBuf::from(answer)))
        } else {
            Ok(Some(PathBuf::from(format!("{}.mp3", answer))))
        }
    }

    async fn generate_audio(
        &mut self,
        text: &str,
        path: &Path,
        voice: &Voice,
        engine: Engine,
        prosody: Option<Prosody>,
    ) -> Result<()> {
        let mut request = TextRequest::new(text, voice.id.as_str(), engine);
        if let Some(prosody) = prosody {
            request = request.with_ssml(prosody);
        }

        writeln!(self.output, "\n🎵 Generating audio...")?;
        writeln!(self.output, "   Voice: {}", voice.name)?;
        writeln!(self.output, "   Engine: {}", engine)?;
        writeln!(self.output, "   Text length: {} characters", request.char_count())?;

        match self
            .podcast_service
            .generate(&request, OutputTarget::Path(path.to_path_buf()))
            .await
        {
            Ok(output) => {
                writeln!(self.output, "\n✅ SUCCESS!")?;
                writeln!(self.output, "   File: {}", output.path.display())?;
                writeln!(self.output, "   Size: {:.2} KB", output.size_bytes as f64 / 1024.0)?;
                writeln!(self.output, "   Segments: {}", output.segment_count)?;
            }
            Err(e) => writeln!(self.output, "\n❌ Error: {}", e)?,
        }
        Ok(())
    }
}
