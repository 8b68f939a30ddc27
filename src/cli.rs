//! Terminal front end for the controller.
//!
//! `run_batch` walks a fixed upload → generate → edit sequence; [`Console`]
//! reads one command per line and prints the session state after each.

use crate::app::{App, Snapshot};
use crate::image::{load_data_url, ImageStore};
use crate::models::Medium;
use crate::{data_url, Result};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(PathBuf),
    Generate(Medium),
    Edit(String),
    Save(Option<String>),
    Status,
    Reset,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "upload" if !rest.is_empty() => Ok(Command::Upload(PathBuf::from(rest))),
            "upload" => Err("usage: upload <path>".to_string()),
            "generate" => rest.parse().map(Command::Generate).map_err(|_| {
                format!(
                    "usage: generate <{}>",
                    Medium::ALL.map(Medium::slug).join("|")
                )
            }),
            "edit" if !rest.is_empty() => Ok(Command::Edit(rest.to_string())),
            "edit" => Err("usage: edit <instruction>".to_string()),
            "save" => Ok(Command::Save((!rest.is_empty()).then(|| rest.to_string()))),
            "status" => Ok(Command::Status),
            "reset" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}

pub const HELP: &str = "\
Commands:
  upload <path>        load a product image
  generate <medium>    place the product on a mug, t-shirt or billboard
  edit <instruction>   change the generated image
  save [name]          write the generated image to the output directory
  status               show the current session state
  reset                start over
  quit                 leave";

/// One-line summary of a snapshot, plus the error line when set.
pub fn render(snapshot: &Snapshot) -> String {
    let describe = |image: &Option<String>| match image.as_deref().map(data_url::decode) {
        Some(Ok(inline)) => format!("{} ({} base64 chars)", inline.mime_type, inline.data.len()),
        Some(Err(_)) => "unreadable".to_string(),
        None => "none".to_string(),
    };

    let mut out = format!(
        "[{}] product: {}, generated: {}",
        snapshot.phase(),
        describe(&snapshot.product_image),
        describe(&snapshot.generated_image)
    );
    if let Some(error) = &snapshot.error {
        out.push_str("\nError: ");
        out.push_str(error);
    }
    out
}

/// Interactive session over an [`App`].
pub struct Console {
    app: App,
    store: ImageStore,
    saved: usize,
}

impl Console {
    pub fn new(app: App, store: ImageStore) -> Self {
        Self {
            app,
            store,
            saved: 0,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Run one command and describe what happened.
    pub async fn execute(&mut self, command: Command) -> Result<String> {
        match command {
            Command::Upload(path) => {
                let image = load_data_url(&path).await?;
                self.app.upload(image);
                Ok(format!("Uploaded {}", path.display()))
            }
            Command::Generate(medium) => {
                self.app.select_medium(medium).await?;
                Ok(format!("Generated {} visualization", medium))
            }
            Command::Edit(instruction) => {
                self.app.submit_edit(&instruction).await?;
                Ok("Edit applied".to_string())
            }
            Command::Save(name) => {
                let Some(image) = self.app.snapshot().generated_image else {
                    return Ok("Nothing to save yet".to_string());
                };
                self.saved += 1;
                let name = name.unwrap_or_else(|| format!("{:02}_image", self.saved));
                let path = self.store.save(&image, &name).await?;
                Ok(format!("Saved {}", path.display()))
            }
            Command::Reset => {
                self.app.reset();
                Ok("Session cleared".to_string())
            }
            Command::Status => Ok(String::new()),
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok(String::new()),
        }
    }

    /// Read commands from `input` until EOF or `quit`.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(format!("{}\n", HELP).as_bytes()).await?;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let message = match Command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => match self.execute(command).await {
                    Ok(message) => message,
                    Err(e) => format!("Error: {}", e),
                },
                Err(usage) => format!("{}\n{}", usage, HELP),
            };

            if !message.is_empty() {
                output.write_all(format!("{}\n", message).as_bytes()).await?;
            }
            output
                .write_all(format!("{}\n", render(&self.app.snapshot())).as_bytes())
                .await?;
            output.flush().await?;
        }

        Ok(())
    }
}

/// Upload `image`, place it into `medium`, then apply `edits` in order.
///
/// Every produced image is saved; the returned paths are in step order.
pub async fn run_batch(
    app: &App,
    store: &ImageStore,
    image: &Path,
    medium: Medium,
    edits: &[String],
) -> Result<Vec<PathBuf>> {
    let mut saved = Vec::with_capacity(edits.len() + 1);

    app.upload(load_data_url(image).await?);
    let generated = app.select_medium(medium).await?;
    saved.push(store.save(&generated, &format!("01_{}", medium.slug())).await?);

    for (i, instruction) in edits.iter().enumerate() {
        let edited = app.submit_edit(instruction).await?;
        saved.push(store.save(&edited, &format!("{:02}_edit", i + 2)).await?);
    }

    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockImageBackend;
    use crate::app::Phase;
    use crate::Error;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn product_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("product.png");
        std::fs::write(&path, PNG_SIGNATURE).unwrap();
        path
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("upload ./shoe.png").unwrap(),
            Command::Upload(PathBuf::from("./shoe.png"))
        );
        assert_eq!(
            Command::parse("generate T-Shirt").unwrap(),
            Command::Generate(Medium::TShirt)
        );
        assert_eq!(
            Command::parse("  edit add a retro filter  ").unwrap(),
            Command::Edit("add a retro filter".to_string())
        );
        assert_eq!(Command::parse("save").unwrap(), Command::Save(None));
        assert_eq!(
            Command::parse("save final").unwrap(),
            Command::Save(Some("final".to_string()))
        );
        assert_eq!(Command::parse("EXIT").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Command::parse("generate poster")
            .unwrap_err()
            .contains("mug|t-shirt|billboard"));
        assert!(Command::parse("edit").is_err());
        assert!(Command::parse("upload").is_err());
        assert!(Command::parse("dance").unwrap_err().contains("unknown"));
    }

    #[test]
    fn test_render_includes_phase_and_error() {
        let snapshot = Snapshot {
            product_image: Some("data:image/png;base64,AAAA".to_string()),
            generated_image: None,
            is_loading: false,
            error: Some("Failed to generate visualization. Please try again.".to_string()),
        };
        assert_eq!(
            render(&snapshot),
            "[ready] product: image/png (4 base64 chars), generated: none\n\
             Error: Failed to generate visualization. Please try again."
        );
    }

    #[tokio::test]
    async fn test_run_batch_saves_every_step() {
        let dir = TempDir::new().unwrap();
        let backend = MockImageBackend::new()
            .with_image("image/png", "RzE=")
            .with_image("image/jpeg", "RzI=");
        let app = App::new(Box::new(backend.clone()));
        let store = ImageStore::new(&dir.path().join("out"));

        let paths = run_batch(
            &app,
            &store,
            &product_file(&dir),
            Medium::Billboard,
            &["add sunset lighting".to_string()],
        )
        .await
        .unwrap();

        assert_eq!(
            paths,
            vec![
                dir.path().join("out").join("01_billboard.png"),
                dir.path().join("out").join("02_edit.jpg"),
            ]
        );
        assert_eq!(backend.requests()[1].prompt, "add sunset lighting");
    }

    #[tokio::test]
    async fn test_run_batch_stops_on_failure() {
        let dir = TempDir::new().unwrap();
        let backend = MockImageBackend::new().with_error("down");
        let app = App::new(Box::new(backend));
        let store = ImageStore::new(dir.path());

        let err = run_batch(&app, &store, &product_file(&dir), Medium::Mug, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::GenerationFailed));
        assert_eq!(app.phase(), Phase::Ready);
    }

    #[tokio::test]
    async fn test_console_save_rejects_path_traversal() {
        let dir = TempDir::new().unwrap();
        let backend = MockImageBackend::new().with_image("image/png", "RzE=");
        let mut console = Console::new(
            App::new(Box::new(backend)),
            ImageStore::new(&dir.path().join("out")),
        );

        console
            .execute(Command::Upload(product_file(&dir)))
            .await
            .unwrap();
        console.execute(Command::Generate(Medium::Mug)).await.unwrap();

        let err = console
            .execute(Command::parse("save ../escape").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFileName(ref n) if n == "../escape"));
        assert!(!dir.path().join("escape.png").exists());
    }

    #[tokio::test]
    async fn test_console_session() {
        let dir = TempDir::new().unwrap();
        let product = product_file(&dir);
        let backend = MockImageBackend::new()
            .with_image("image/png", "RzE=")
            .with_no_image();
        let mut console = Console::new(
            App::new(Box::new(backend)),
            ImageStore::new(&dir.path().join("out")),
        );

        let script = format!(
            "upload {}\ngenerate mug\nedit make it blue\nsave\nreset\nquit\nstatus\n",
            product.display()
        );
        let mut output = Vec::new();
        console
            .run(tokio::io::BufReader::new(script.as_bytes()), &mut output)
            .await
            .unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Generated Mug visualization"));
        assert!(output.contains("[viewing]"));
        assert!(output.contains("Error: Failed to edit image. Please try again."));
        assert!(output.contains("Saved"));
        assert!(output.contains("[empty] product: none, generated: none"));
        assert!(dir.path().join("out").join("01_image.png").exists());
        assert_eq!(console.app().phase(), Phase::Empty);
    }
}
