use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use app_logging::app_warn;

use crate::api::ProjectApi;
use crate::{EngineEvent, RequestId};

enum EngineCommand {
    ListProjects {
        request: RequestId,
    },
    FetchTranscript {
        request: RequestId,
        project_id: String,
    },
    DeleteProject {
        request: RequestId,
        project_id: String,
    },
    DownloadTranscript {
        project_id: String,
        title: String,
    },
    DownloadAudio {
        project_id: String,
        filename: String,
    },
}

/// Runs API calls on a background tokio runtime and reports completions as
/// [`EngineEvent`]s. Commands are independent; completions may arrive in any
/// order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn ProjectApi>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(api.as_ref(), command).await;
                    if event_tx.send(event).is_err() {
                        app_warn!("Engine event dropped: receiver closed");
                    }
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn list_projects(&self, request: RequestId) {
        self.send(EngineCommand::ListProjects { request });
    }

    pub fn fetch_transcript(&self, request: RequestId, project_id: impl Into<String>) {
        self.send(EngineCommand::FetchTranscript {
            request,
            project_id: project_id.into(),
        });
    }

    pub fn delete_project(&self, request: RequestId, project_id: impl Into<String>) {
        self.send(EngineCommand::DeleteProject {
            request,
            project_id: project_id.into(),
        });
    }

    pub fn download_transcript(&self, project_id: impl Into<String>, title: impl Into<String>) {
        self.send(EngineCommand::DownloadTranscript {
            project_id: project_id.into(),
            title: title.into(),
        });
    }

    pub fn download_audio(&self, project_id: impl Into<String>, filename: impl Into<String>) {
        self.send(EngineCommand::DownloadAudio {
            project_id: project_id.into(),
            filename: filename.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            app_warn!("Engine command dropped: worker thread has stopped");
        }
    }
}

async fn handle_command(api: &dyn ProjectApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::ListProjects { request } => EngineEvent::ProjectsListed {
            request,
            result: api.list_projects().await,
        },
        EngineCommand::FetchTranscript {
            request,
            project_id,
        } => EngineEvent::TranscriptFetched {
            request,
            result: api.get_transcript(&project_id).await,
        },
        EngineCommand::DeleteProject {
            request,
            project_id,
        } => {
            let result = api.delete_project(&project_id).await.map(|_| ());
            EngineEvent::ProjectDeleted {
                request,
                project_id,
                result,
            }
        }
        EngineCommand::DownloadTranscript { project_id, title } => {
            let result = api.download_transcript(&project_id, &title).await;
            EngineEvent::DownloadCompleted { project_id, result }
        }
        EngineCommand::DownloadAudio {
            project_id,
            filename,
        } => {
            let result = api.download_audio(&project_id, &filename).await;
            EngineEvent::DownloadCompleted { project_id, result }
        }
    }
}
