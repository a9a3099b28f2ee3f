//! Registro de tareas simuladas pendientes
//!
//! Cada tarea (análisis de diagnóstico, procesamiento de reserva, respuesta
//! del chat) pertenece a un usuario. Se puede cancelar una a una o todas al
//! cerrar sesión.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::{AbortHandle, JoinHandle};
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct PendingTasks {
    tasks: Arc<Mutex<HashMap<Uuid, HashMap<Uuid, AbortHandle>>>>,
}

impl PendingTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lanza `future` registrado bajo `owner`. La entrada se borra sola al terminar.
    pub async fn spawn<F>(&self, owner: Uuid, task_id: Uuid, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        // El lock se mantiene hasta registrar el handle: la tarea no puede
        // desregistrarse antes de estar registrada.
        let mut tasks = self.tasks.lock().await;
        let registry = self.clone();
        let handle = tokio::spawn(async move {
            let output = future.await;
            registry.finish(owner, task_id).await;
            output
        });
        tasks
            .entry(owner)
            .or_default()
            .insert(task_id, handle.abort_handle());
        handle
    }

    async fn finish(&self, owner: Uuid, task_id: Uuid) {
        let mut tasks = self.tasks.lock().await;
        if let Some(owned) = tasks.get_mut(&owner) {
            owned.remove(&task_id);
            if owned.is_empty() {
                tasks.remove(&owner);
            }
        }
    }

    /// Cancela una tarea; `false` si ya no estaba pendiente
    pub async fn cancel(&self, owner: Uuid, task_id: Uuid) -> bool {
        let mut tasks = self.tasks.lock().await;
        let Some(owned) = tasks.get_mut(&owner) else {
            return false;
        };
        let cancelled = match owned.remove(&task_id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        };
        if owned.is_empty() {
            tasks.remove(&owner);
        }
        cancelled
    }

    /// Cancela todas las tareas del usuario y devuelve sus ids
    pub async fn cancel_all(&self, owner: Uuid) -> Vec<Uuid> {
        let owned = self.tasks.lock().await.remove(&owner).unwrap_or_default();
        owned
            .into_iter()
            .map(|(task_id, handle)| {
                handle.abort();
                task_id
            })
            .collect()
    }

    pub async fn pending_for(&self, owner: Uuid) -> usize {
        self.tasks
            .lock()
            .await
            .get(&owner)
            .map_or(0, |owned| owned.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_finished_task_unregisters_itself() {
        let tasks = PendingTasks::new();
        let owner = Uuid::new_v4();
        let handle = tasks.spawn(owner, Uuid::new_v4(), async { 7 }).await;
        assert_eq!(handle.await.unwrap(), 7);
        assert_eq!(tasks.pending_for(owner).await, 0);
    }

    #[tokio::test]
    async fn test_cancel_prevents_side_effect() {
        let tasks = PendingTasks::new();
        let owner = Uuid::new_v4();
        let task_id = Uuid::new_v4();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let handle = tasks
            .spawn(owner, task_id, async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                flag.store(true, Ordering::SeqCst);
            })
            .await;

        assert!(tasks.cancel(owner, task_id).await);
        assert!(handle.await.unwrap_err().is_cancelled());
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(!fired.load(Ordering::SeqCst));
        assert!(!tasks.cancel(owner, task_id).await);
    }

    #[tokio::test]
    async fn test_cancel_all_only_touches_owner() {
        let tasks = PendingTasks::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let slow = || tokio::time::sleep(Duration::from_secs(5));

        tasks.spawn(owner, Uuid::new_v4(), slow()).await;
        tasks.spawn(owner, Uuid::new_v4(), slow()).await;
        let survivor = tasks.spawn(other, Uuid::new_v4(), slow()).await;

        assert_eq!(tasks.cancel_all(owner).await.len(), 2);
        assert_eq!(tasks.pending_for(owner).await, 0);
        assert_eq!(tasks.pending_for(other).await, 1);
        survivor.abort();
    }
}
