use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use matcher_logging::{matcher_info, matcher_warn};

use crate::client::Backend;
use crate::{BackendError, BackendRequest, EngineEvent, Extraction, Reply, RequestId};

struct EngineCommand {
    request_id: RequestId,
    request: BackendRequest,
}

/// Runs backend requests on a background tokio runtime.
///
/// Requests execute concurrently and are not cancellable; events arrive in
/// completion order, not submission order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(backend: Arc<dyn Backend>) -> io::Result<(Self, mpsc::Receiver<EngineEvent>)> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let kind = command.request.kind();
                    let result = execute(backend.as_ref(), command.request).await;
                    match &result {
                        Ok(_) => matcher_info!("request {} ({:?}) done", command.request_id, kind),
                        Err(err) => {
                            matcher_warn!("request {} ({:?}) failed: {}", command.request_id, kind, err)
                        }
                    }
                    let _ = event_tx.send(EngineEvent {
                        request_id: command.request_id,
                        kind,
                        result,
                    });
                });
            }
        });

        Ok((Self { cmd_tx }, event_rx))
    }

    /// Queue a request. Returns `false` once the engine thread has gone away.
    pub fn submit(&self, request_id: RequestId, request: BackendRequest) -> bool {
        self.cmd_tx
            .send(EngineCommand {
                request_id,
                request,
            })
            .is_ok()
    }
}

/// Run one request against `backend` and shape the reply for the caller.
///
/// Text extraction keeps the submitted text as the JD text; file extraction
/// keeps whatever text the backend extracted from the document.
pub async fn execute(backend: &dyn Backend, request: BackendRequest) -> Result<Reply, BackendError> {
    match request {
        BackendRequest::ExtractJdFile(file) => {
            let response = backend.extract_jd_file(&file).await?;
            Ok(Reply::Extracted(Extraction {
                text: response.text.unwrap_or_default(),
                groups: response.groups,
                exclude: response.exclude,
            }))
        }
        BackendRequest::ExtractJdText(text) => {
            let response = backend.extract_jd_text(&text).await?;
            Ok(Reply::Extracted(Extraction {
                text,
                groups: response.groups,
                exclude: response.exclude,
            }))
        }
        BackendRequest::GenerateBoolean(request) => {
            let response = backend.generate_boolean(&request).await?;
            Ok(Reply::Boolean(response.boolean_query))
        }
        BackendRequest::GeneratePointers(request) => {
            let response = backend.generate_pointers(&request).await?;
            Ok(Reply::Pointers(response))
        }
    }
}
