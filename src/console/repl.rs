//! Interactive loop: stdin lines in, rendered views out.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::advice::MaterialConsultant;
use crate::delivery::draft::draft_text;
use crate::error::{Error, Result};
use crate::intake::{PhotoHandle, Step, StepController, SubmitOutcome, build_delivery_link};

use super::intent::{Intent, IntentParser};
use super::render::{help, render};

/// What the loop should do after an intent was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Handoff {
    Link,
    Draft,
}

/// The terminal front end. Holds no form state of its own.
pub struct Console {
    controller: Arc<StepController>,
    consultant: MaterialConsultant,
}

impl Console {
    pub fn new(controller: Arc<StepController>, consultant: MaterialConsultant) -> Self {
        Self {
            controller,
            consultant,
        }
    }

    /// Read commands from stdin until EOF or `quit`.
    pub async fn run(&self) -> Result<()> {
        let _watcher = self.spawn_step_watcher();

        let snapshot = self.controller.snapshot().await;
        println!("{}\n\n{}\n", render(&snapshot), help(snapshot.step));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        eprint!("> ");
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let reply = self.handle(IntentParser::parse(&line)).await;
                    if !reply.text.is_empty() {
                        println!("{}\n", reply.text);
                    }
                    if reply.quit {
                        break;
                    }
                    eprint!("> ");
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    break;
                }
            }
        }
        Ok(())
    }

    /// Print the new view whenever the step changes, including changes made
    /// by a background submission.
    fn spawn_step_watcher(&self) -> tokio::task::JoinHandle<()> {
        let mut rx = self.controller.subscribe();
        tokio::spawn(async move {
            let mut last = rx.borrow_and_update().step;
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update().clone();
                if snapshot.step != last {
                    last = snapshot.step;
                    println!("\n{}\n", render(&snapshot));
                    eprint!("> ");
                }
            }
        })
    }

    /// Apply one intent and describe the result.
    pub async fn handle(&self, intent: Intent) -> Reply {
        let controller = &self.controller;
        let result: Result<Reply> = match intent {
            Intent::Help => Ok(Reply::say(help(controller.step().await))),
            Intent::Show => Ok(Reply::say(render(&controller.snapshot().await))),
            Intent::Quit => Ok(Reply {
                text: String::new(),
                quit: true,
            }),
            Intent::Invalid(hint) => Ok(Reply::say(hint)),

            Intent::SetLead(patch) => controller
                .merge_lead(patch)
                .await
                .map(|()| Reply::say("Saved."))
                .map_err(Error::from),
            Intent::SetProject(patch) => controller
                .merge_project(patch)
                .await
                .map(|()| Reply::say("Saved."))
                .map_err(Error::from),
            Intent::ToggleArea(area) => match controller.toggle_area(area).await {
                Ok(selection) if selection.area == [area] => {
                    Ok(Reply::say(format!("{area} stays selected: at least one area is required.")))
                }
                Ok(selection) => {
                    let names: Vec<&str> = selection.area.iter().map(|a| a.as_str()).collect();
                    Ok(Reply::say(format!("Areas: {}", names.join(", "))))
                }
                Err(e) => Err(e.into()),
            },
            Intent::ToggleSurface { area, surface } => {
                match controller.toggle_sub_area(area, &surface).await {
                    Ok(true) => Ok(Reply::say(render(&controller.snapshot().await))),
                    Ok(false) => Ok(Reply::say(format!(
                        "Select {area} first, then pick one of: {}",
                        area.surfaces().join(", ")
                    ))),
                    Err(e) => Err(e.into()),
                }
            }
            Intent::AddPhotos(paths) => self.add_photos(&paths).await,
            Intent::RemovePhoto(index) => controller
                .remove_photo(index)
                .await
                .map(|photo| Reply::say(format!("Removed {}.", photo.name)))
                .map_err(Error::from),
            Intent::Ask(question) => Ok(match self.consultant.ask(&question).await {
                Some(answer) => Reply::say(answer),
                None => Reply::say("Ask me about durability, slip resistance, or style trends..."),
            }),

            Intent::Next => controller
                .advance()
                .await
                .map(|_| Reply::say(help(Step::ProjectEntry)))
                .map_err(Error::from),
            Intent::Back => controller
                .retreat()
                .await
                .map(|_| Reply::say(help(Step::LeadEntry)))
                .map_err(Error::from),
            Intent::Submit => Ok(self.submit_in_background()),
            Intent::NewEstimate => controller
                .reset()
                .await
                .map(|()| Reply::say(help(Step::LeadEntry)))
                .map_err(Error::from),

            Intent::Link => self.completed_text(Handoff::Link).await,
            Intent::Draft => self.completed_text(Handoff::Draft).await,
        };

        result.unwrap_or_else(|e| Reply::say(format!("{e}")))
    }

    /// The mail link or email draft of a completed request.
    async fn completed_text(&self, handoff: Handoff) -> Result<Reply> {
        let snapshot = self.controller.snapshot().await;
        if snapshot.step != Step::Complete {
            return Ok(Reply::say("Submit the request first."));
        }
        match handoff {
            Handoff::Link => Ok(Reply::say(build_delivery_link(&snapshot.data))),
            Handoff::Draft => Ok(Reply::say(draft_text(&snapshot.data)?)),
        }
    }

    /// Start the submission without blocking input. A second `submit`
    /// while this one runs is ignored by the controller.
    fn submit_in_background(&self) -> Reply {
        if self.controller.is_submitting() {
            return Reply::say("Already submitting, please wait.");
        }
        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move {
            match controller.submit().await {
                Ok(SubmitOutcome::Completed(request)) => {
                    tracing::debug!(request_id = %request.id, "Submission finished");
                }
                Ok(SubmitOutcome::AlreadySubmitting) => {}
                Err(e) => {
                    println!("\nSubmission failed: {e}\n");
                    eprint!("> ");
                }
            }
        });
        Reply::say("Submitting your request...")
    }

    /// Collect name and size of each file. File contents are never read.
    async fn add_photos(&self, paths: &[PathBuf]) -> Result<Reply> {
        let mut photos = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();

        for path in paths {
            match tokio::fs::metadata(path).await {
                Ok(meta) if meta.is_file() => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    photos.push(PhotoHandle::new(name, meta.len()));
                }
                Ok(_) => skipped.push(format!("{} (not a file)", path.display())),
                Err(e) => skipped.push(format!("{} ({e})", path.display())),
            }
        }

        let mut text = String::new();
        if !photos.is_empty() {
            let added = photos.len();
            let total = self.controller.add_photos(photos).await?;
            text.push_str(&format!("Added {added} photo(s); {total} attached."));
        }
        if !skipped.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&format!("Skipped: {}", skipped.join(", ")));
        }
        Ok(Reply::say(text))
    }
}
