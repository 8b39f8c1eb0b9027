//! Executable handles.

use serde::Serialize;

use crate::core::artifact::Artifact;

/// An executable artifact plus the files it needs at run time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilesToRun {
    executable: Artifact,
    runfiles: Vec<Artifact>,
}

impl FilesToRun {
    /// Wrap an executable with no runfiles.
    pub fn new(executable: Artifact) -> Self {
        FilesToRun {
            executable,
            runfiles: Vec::new(),
        }
    }

    /// Add a runtime dependency.
    pub fn runfile(mut self, artifact: Artifact) -> Self {
        self.runfiles.push(artifact);
        self
    }

    /// Add multiple runtime dependencies.
    pub fn runfiles(mut self, artifacts: impl IntoIterator<Item = Artifact>) -> Self {
        self.runfiles.extend(artifacts);
        self
    }

    pub fn executable(&self) -> Artifact {
        self.executable
    }

    /// Exec path of the executable itself.
    pub fn executable_path(&self) -> &'static str {
        self.executable.exec_path()
    }

    pub fn runfile_artifacts(&self) -> &[Artifact] {
        &self.runfiles
    }

    /// All inputs an action running this tool depends on: the executable
    /// first, then runfiles in order, each artifact once.
    pub fn tool_inputs(&self) -> Vec<Artifact> {
        let mut inputs = Vec::with_capacity(self.runfiles.len() + 1);
        push_unique(&mut inputs, self.executable);
        for runfile in &self.runfiles {
            push_unique(&mut inputs, *runfile);
        }
        inputs
    }
}

pub(crate) fn push_unique(list: &mut Vec<Artifact>, artifact: Artifact) {
    if !list.contains(&artifact) {
        list.push(artifact);
    }
}

/// Label of the runtime support target generated code links against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RuntimeTarget(String);

impl RuntimeTarget {
    /// Create a runtime target from its label.
    pub fn new(label: impl Into<String>) -> Self {
        RuntimeTarget(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}
