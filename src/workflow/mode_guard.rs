//! Scoped element-edit state

use crate::core::error::HostResult;
use crate::core::types::{InteractionMode, ObjectId};
use crate::scene::SceneHost;

/// Holds the host in element editing on one object
///
/// Dropping the guard without calling `exit` returns the host to the mode
/// that was active before `enter`, first through a regular exit and, if that
/// fails, by forcing the mode.
pub struct EditModeGuard<'a, H: SceneHost + ?Sized> {
    host: &'a mut H,
    previous: InteractionMode,
    active: bool,
}

impl<'a, H: SceneHost + ?Sized> EditModeGuard<'a, H> {
    pub fn enter(host: &'a mut H, object: ObjectId) -> HostResult<Self> {
        let previous = host.enter_edit_mode(object)?;
        Ok(Self {
            host,
            previous,
            active: true,
        })
    }

    pub fn previous_mode(&self) -> InteractionMode {
        self.previous
    }

    pub fn host(&mut self) -> &mut H {
        &mut *self.host
    }

    /// Leave element editing and report the host's answer
    ///
    /// On failure the guard stays armed and the drop fallback still runs.
    pub fn exit(mut self) -> HostResult<()> {
        self.host.exit_edit_mode(self.previous)?;
        self.active = false;
        Ok(())
    }
}

impl<H: SceneHost + ?Sized> Drop for EditModeGuard<'_, H> {
    fn drop(&mut self) {
        if !self.active {
            return;
        }

        if let Err(e) = self.host.exit_edit_mode(self.previous) {
            tracing::warn!("Exit edit mode failed ({}), forcing {}", e, self.previous);
            if let Err(e) = self.host.set_interaction_mode(self.previous) {
                tracing::error!("Could not restore {} mode: {}", self.previous, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{HostOp, MemoryScene};

    #[test]
    fn test_exit_restores_previous_mode() {
        let mut scene = MemoryScene::new();
        let cube = scene.add_mesh("Cube");

        let mut guard = EditModeGuard::enter(&mut scene, cube).unwrap();
        assert_eq!(guard.host().interaction_mode(), InteractionMode::Edit);
        assert_eq!(guard.previous_mode(), InteractionMode::Object);
        guard.exit().unwrap();

        assert_eq!(scene.interaction_mode(), InteractionMode::Object);
    }

    #[test]
    fn test_drop_restores_previous_mode() {
        let mut scene = MemoryScene::new();
        let cube = scene.add_mesh("Cube");
        {
            let _guard = EditModeGuard::enter(&mut scene, cube).unwrap();
        }
        assert_eq!(scene.interaction_mode(), InteractionMode::Object);
    }

    #[test]
    fn test_failed_exit_still_restores_mode() {
        let mut scene = MemoryScene::new();
        let cube = scene.add_mesh("Cube");

        let mut guard = EditModeGuard::enter(&mut scene, cube).unwrap();
        guard.host().fail_next(HostOp::ExitEditMode);
        assert!(guard.exit().is_err());

        assert_eq!(scene.interaction_mode(), InteractionMode::Object);
    }

    #[test]
    fn test_enter_on_non_mesh_fails() {
        let mut scene = MemoryScene::new();
        let empty = scene.add_empty("Empty");
        assert!(EditModeGuard::enter(&mut scene, empty).is_err());
        assert_eq!(scene.interaction_mode(), InteractionMode::Object);
    }
}
