use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::{Context, Result};
use matcher_core::{Effect, JdExtraction, Msg, PointerReport, RequestKind, UploadFile};
use matcher_engine::{
    BackendRequest, BooleanRequest, EngineEvent, EngineHandle, PointersRequest, Reply,
    ReqwestBackend, Upload,
};
use matcher_logging::{matcher_info, matcher_warn};

use super::LoopEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: matcher_engine::BackendSettings,
        loop_tx: mpsc::Sender<LoopEvent>,
    ) -> Result<Self> {
        let base_url = settings.base_url.clone();
        let backend = ReqwestBackend::new(settings)
            .with_context(|| format!("cannot use backend at {base_url}"))?;
        let (engine, events) =
            EngineHandle::spawn(Arc::new(backend)).context("failed to start engine runtime")?;
        spawn_event_loop(events, loop_tx);
        Ok(Self { engine })
    }

    /// Hand effects to the engine. Returns messages for requests that could
    /// not be submitted so the caller can feed them back into `update`.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut failed = Vec::new();
        for effect in effects {
            let request_id = effect.request_id();
            let kind = effect.kind();
            matcher_info!("submit request {} ({})", request_id, kind);
            if !self.engine.submit(request_id, to_request(effect)) {
                matcher_warn!("engine gone; request {} dropped", request_id);
                failed.push(Msg::RequestFailed {
                    request_id,
                    kind,
                    message: "request engine is not running".to_string(),
                });
            }
        }
        failed
    }
}

fn spawn_event_loop(events: mpsc::Receiver<EngineEvent>, loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            if loop_tx.send(LoopEvent::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn to_request(effect: Effect) -> BackendRequest {
    match effect {
        Effect::ExtractJdFile { file, .. } => BackendRequest::ExtractJdFile(to_upload(file)),
        Effect::ExtractJdText { text, .. } => BackendRequest::ExtractJdText(text),
        Effect::GenerateBoolean {
            groups, exclude, ..
        } => BackendRequest::GenerateBoolean(BooleanRequest { groups, exclude }),
        Effect::GeneratePointers {
            resume,
            target_match,
            jd_text,
            ..
        } => BackendRequest::GeneratePointers(PointersRequest {
            resume: to_upload(resume),
            target_match,
            jd_text,
        }),
    }
}

fn to_upload(file: UploadFile) -> Upload {
    Upload::new(file.file_name, file.bytes)
}

fn map_event(event: EngineEvent) -> Msg {
    let request_id = event.request_id;
    match event.result {
        Ok(Reply::Extracted(extraction)) => Msg::JdExtracted {
            request_id,
            extraction: JdExtraction {
                text: extraction.text,
                groups: extraction.groups,
                exclude: extraction.exclude,
            },
        },
        Ok(Reply::Boolean(query)) => Msg::BooleanGenerated { request_id, query },
        Ok(Reply::Pointers(response)) => Msg::PointersGenerated {
            request_id,
            report: PointerReport {
                match_score: response.match_score,
                role_title: response.role_title,
                role_type: response.role_type,
                level: response.level,
                updated_pointers: response.updated_pointers,
            },
        },
        Err(err) => Msg::RequestFailed {
            request_id,
            kind: map_kind(event.kind),
            message: err.to_string(),
        },
    }
}

fn map_kind(kind: matcher_engine::RequestKind) -> RequestKind {
    match kind {
        matcher_engine::RequestKind::ExtractJd => RequestKind::ExtractJd,
        matcher_engine::RequestKind::GenerateBoolean => RequestKind::GenerateBoolean,
        matcher_engine::RequestKind::GeneratePointers => RequestKind::GeneratePointers,
    }
}
