//! Shared helpers for adapter tests: a scripted process runner and fixture
//! files.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pdfwrap_backend::{BackendError, Invocation, ProcessOutput, ProcessRunner};

type Response = Box<dyn FnOnce(&Invocation) -> ProcessOutput + Send>;

/// Queue of canned responses, consumed one per invocation.
#[derive(Default)]
pub struct Script {
    responses: VecDeque<Response>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with a custom closure.
    pub fn then(
        mut self,
        respond: impl FnOnce(&Invocation) -> ProcessOutput + Send + 'static,
    ) -> Self {
        self.responses.push_back(Box::new(respond));
        self
    }

    /// Succeed without output.
    pub fn succeed(self) -> Self {
        self.then(|_| ProcessOutput::ok(""))
    }

    /// Succeed, printing `stdout`.
    pub fn print(self, stdout: &str) -> Self {
        let stdout = stdout.to_string();
        self.then(move |_| ProcessOutput::ok(stdout))
    }

    /// Succeed after writing `contents` to the path in the last argument,
    /// like a tool producing its output file.
    pub fn write_last_arg(self, contents: &str) -> Self {
        let contents = contents.to_string();
        self.then(move |invocation| {
            let target = last_arg(invocation);
            fs::write(&target, contents).expect("write scripted output");
            ProcessOutput::ok("")
        })
    }

    /// Exit with `code`, printing `stderr`.
    pub fn fail(self, code: i32, stderr: &str) -> Self {
        let stderr = stderr.to_string();
        self.then(move |_| ProcessOutput::failed(code, stderr))
    }

    pub fn build(self) -> Arc<ScriptedRunner> {
        Arc::new(ScriptedRunner {
            responses: Mutex::new(self.responses),
            calls: Mutex::new(Vec::new()),
        })
    }
}

/// [`ProcessRunner`] that records invocations and replays a [`Script`].
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Response>>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    /// Recorded invocations in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Arguments of each recorded invocation.
    pub fn call_args(&self) -> Vec<Vec<String>> {
        self.calls().iter().map(Invocation::args_lossy).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, BackendError> {
        self.calls.lock().unwrap().push(invocation.clone());
        let respond = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected invocation: {invocation}"));
        Ok(respond(invocation))
    }
}

pub fn last_arg(invocation: &Invocation) -> PathBuf {
    PathBuf::from(invocation.args.last().expect("invocation has arguments"))
}

/// A directory holding a stand-in tool binary and input files.
pub struct Workspace {
    pub dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// An existing file to pass as the tool binary; it is never executed.
    pub fn binary(&self) -> PathBuf {
        let path = self.path("tool");
        fs::write(&path, b"#!/bin/sh\n").unwrap();
        path
    }

    /// An existing input file with placeholder contents.
    pub fn pdf(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, b"%PDF-1.5\n%original\n").unwrap();
        path
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

/// A PDF with `page_count` empty A4 pages, generated with lopdf.
pub fn fixture_pdf(path: &Path, page_count: usize) {
    use lopdf::{Object, dictionary};

    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..page_count)
        .map(|_| {
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(595),
                    Object::Integer(842),
                ],
            });
            Object::Reference(page_id)
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count as i64),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.save(path).unwrap();
}
