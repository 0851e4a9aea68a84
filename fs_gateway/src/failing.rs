//! Fault-injecting gateway wrapper
//!
//! Wraps any gateway and fails operations according to a policy. Used to
//! exercise error paths (best-effort refresh, clipboard preservation)
//! without requiring an actual backend failure.

use crate::error::GatewayError;
use crate::gateway::{FileGateway, Locator, RawEntry};
use crate::path::SandboxPath;
use async_trait::async_trait;
use parking_lot::Mutex;

/// Gateway operations a policy can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayOp {
    List,
    CreateDirectory,
    ReadFile,
    WriteFile,
    DeleteFile,
    DeleteDirectory,
    ResolveLocator,
    Copy,
}

/// Policy for when injected failures occur
#[derive(Debug, Clone)]
pub enum FailurePolicy {
    /// Never fail (passthrough)
    Never,
    /// Fail every operation once N operations have completed
    AfterOps(usize),
    /// Fail every invocation of one specific operation
    OnOperation(GatewayOp),
}

struct PolicyState {
    policy: FailurePolicy,
    op_count: usize,
}

/// Wrapper around a gateway that can simulate failures
pub struct FailingGateway<G> {
    inner: G,
    state: Mutex<PolicyState>,
}

impl<G> FailingGateway<G> {
    /// Creates a failing gateway with the given policy
    pub fn new(inner: G, policy: FailurePolicy) -> Self {
        Self {
            inner,
            state: Mutex::new(PolicyState {
                policy,
                op_count: 0,
            }),
        }
    }

    /// Gets the underlying gateway (for inspection)
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Returns the number of operations that have gone through
    pub fn op_count(&self) -> usize {
        self.state.lock().op_count
    }

    /// Replaces the failure policy and resets the operation counter
    pub fn set_policy(&self, policy: FailurePolicy) {
        let mut state = self.state.lock();
        state.policy = policy;
        state.op_count = 0;
    }

    fn check(&self, op: GatewayOp) -> Result<(), GatewayError> {
        let mut state = self.state.lock();
        let fail = match &state.policy {
            FailurePolicy::Never => false,
            FailurePolicy::AfterOps(n) => state.op_count >= *n,
            FailurePolicy::OnOperation(target) => *target == op,
        };
        if fail {
            return Err(GatewayError::Backend(format!(
                "injected failure on {:?}",
                op
            )));
        }
        state.op_count += 1;
        Ok(())
    }
}

#[async_trait]
impl<G: FileGateway> FileGateway for FailingGateway<G> {
    async fn list(&self, path: &SandboxPath) -> Result<Vec<RawEntry>, GatewayError> {
        self.check(GatewayOp::List)?;
        self.inner.list(path).await
    }

    async fn create_directory(&self, path: &SandboxPath) -> Result<(), GatewayError> {
        self.check(GatewayOp::CreateDirectory)?;
        self.inner.create_directory(path).await
    }

    async fn read_file(&self, path: &SandboxPath) -> Result<Vec<u8>, GatewayError> {
        self.check(GatewayOp::ReadFile)?;
        self.inner.read_file(path).await
    }

    async fn write_file(&self, path: &SandboxPath, bytes: &[u8]) -> Result<(), GatewayError> {
        self.check(GatewayOp::WriteFile)?;
        self.inner.write_file(path, bytes).await
    }

    async fn delete_file(&self, path: &SandboxPath) -> Result<(), GatewayError> {
        self.check(GatewayOp::DeleteFile)?;
        self.inner.delete_file(path).await
    }

    async fn delete_directory(
        &self,
        path: &SandboxPath,
        recursive: bool,
    ) -> Result<(), GatewayError> {
        self.check(GatewayOp::DeleteDirectory)?;
        self.inner.delete_directory(path, recursive).await
    }

    async fn resolve_locator(&self, path: &SandboxPath) -> Result<Locator, GatewayError> {
        self.check(GatewayOp::ResolveLocator)?;
        self.inner.resolve_locator(path).await
    }

    async fn copy(&self, from: &Locator, to: &Locator) -> Result<(), GatewayError> {
        self.check(GatewayOp::Copy)?;
        self.inner.copy(from, to).await
    }
}
