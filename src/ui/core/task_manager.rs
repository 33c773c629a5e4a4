use super::actions::{Action, EditTarget, FormToken, TablePage};
use crate::api::{ApiError, RaceApi};
use crate::constants::{
    ERROR_DELETE_CAR, ERROR_DELETE_PILOT, ERROR_DELETE_RACE, ERROR_LOAD_CARS, ERROR_LOAD_PILOTS, ERROR_LOAD_RACES,
    ERROR_LOAD_RELATIONS, SUCCESS_CAR_CREATED, SUCCESS_CAR_DELETED, SUCCESS_CAR_UPDATED, SUCCESS_PILOT_CREATED,
    SUCCESS_PILOT_DELETED, SUCCESS_PILOT_UPDATED, SUCCESS_RACE_CREATED, SUCCESS_RACE_DELETED, SUCCESS_RACE_UPDATED,
};
use crate::forms::SubmitPayload;
use crate::models::{EntityId, EntityKind, PageRequest, Relations};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Runs every HTTP call on its own tokio task and reports the outcome as an
/// [`Action`] on the channel returned by [`TaskManager::new`].
pub struct TaskManager {
    api: Arc<dyn RaceApi>,
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new(api: Arc<dyn RaceApi>) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                api,
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    /// Server the manager talks to
    pub fn endpoint(&self) -> &str {
        self.api.endpoint()
    }

    fn spawn<F>(&mut self, description: String, operation: F) -> TaskId
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let action_sender = self.action_sender.clone();
        let handle = tokio::spawn(async move {
            // The receiver is gone only while the app shuts down
            let _ = action_sender.send(operation.await);
        });

        let task = BackgroundTask {
            id: task_id,
            handle,
            description,
            started_at: std::time::Instant::now(),
        };

        self.tasks.insert(task_id, task);
        task_id
    }

    /// Fetch one page of a table
    pub fn spawn_page_load(&mut self, kind: EntityKind, request: PageRequest) -> TaskId {
        let api = Arc::clone(&self.api);
        let description = format!("Load {} page {} (size {})", kind.collection(), request.page, request.size);

        self.spawn(description, async move {
            let result = match kind {
                EntityKind::Pilot => api.list_pilots(request).await.map(TablePage::Pilots),
                EntityKind::Car => api.list_cars(request).await.map(TablePage::Cars),
                EntityKind::Race => api.list_races(request).await.map(TablePage::Races),
            };

            match result {
                Ok(page) => Action::PageLoaded { request, page },
                Err(e) => Action::PageFailed {
                    kind,
                    message: failure_message(load_error(kind), &e),
                },
            }
        })
    }

    /// Fetch the pilot and car lists used by the dialog pickers
    pub fn spawn_relations_load(&mut self, size: u32) -> TaskId {
        let api = Arc::clone(&self.api);
        let request = PageRequest::first(size);

        self.spawn("Load relations".to_string(), async move {
            let (pilots, cars) = tokio::join!(api.list_pilots(request), api.list_cars(request));
            match (pilots, cars) {
                (Ok(pilots), Ok(cars)) => Action::RelationsLoaded(Relations {
                    pilots: pilots.content,
                    cars: cars.content,
                }),
                (Err(e), _) | (_, Err(e)) => Action::RelationsFailed(failure_message(ERROR_LOAD_RELATIONS, &e)),
            }
        })
    }

    /// Fetch a single record for the view dialog
    pub fn spawn_record_load(&mut self, kind: EntityKind, id: EntityId) -> TaskId {
        let api = Arc::clone(&self.api);
        let description = format!("Load {} {}", kind.noun(), id);

        self.spawn(description, async move {
            let result = match kind {
                EntityKind::Pilot => api.get_pilot(id).await.map(EditTarget::Pilot),
                EntityKind::Car => api.get_car(id).await.map(EditTarget::Car),
                EntityKind::Race => api.get_race(id).await.map(EditTarget::Race),
            };

            match result {
                Ok(target) => Action::RecordLoaded {
                    title: format!("{} #{}", kind.title(), id),
                    message: describe_record(&target),
                },
                Err(e) => Action::ShowError(failure_message(&format!("Failed to load {} {}", kind.noun(), id), &e)),
            }
        })
    }

    /// POST a new record (`id` is `None`) or PUT an existing one
    pub fn spawn_submit(&mut self, token: FormToken, id: Option<EntityId>, payload: SubmitPayload) -> TaskId {
        let api = Arc::clone(&self.api);
        let kind = payload.kind();
        let description = match id {
            Some(id) => format!("Update {} {}", kind.noun(), id),
            None => format!("Create {}", kind.noun()),
        };

        self.spawn(description, async move {
            let result = match (&payload, id) {
                (SubmitPayload::Pilot(body), None) => api.create_pilot(body).await,
                (SubmitPayload::Pilot(body), Some(id)) => api.update_pilot(id, body).await,
                (SubmitPayload::Car(body), None) => api.create_car(body).await,
                (SubmitPayload::Car(body), Some(id)) => api.update_car(id, body).await,
                (SubmitPayload::Race(body), None) => api.create_race(body).await,
                (SubmitPayload::Race(body), Some(id)) => api.update_race(id, body).await,
            };

            match result {
                Ok(()) => Action::SubmitSucceeded {
                    token,
                    kind,
                    message: submit_success(kind, id.is_none()).to_string(),
                },
                Err(e) => Action::SubmitFailed {
                    token,
                    kind,
                    message: e.user_message(),
                },
            }
        })
    }

    /// DELETE a record; only called once the user confirmed
    pub fn spawn_delete(&mut self, kind: EntityKind, id: EntityId) -> TaskId {
        let api = Arc::clone(&self.api);
        let description = format!("Delete {} {}", kind.noun(), id);

        self.spawn(description, async move {
            let result = match kind {
                EntityKind::Pilot => api.delete_pilot(id).await,
                EntityKind::Car => api.delete_car(id).await,
                EntityKind::Race => api.delete_race(id).await,
            };

            match result {
                Ok(()) => Action::DeleteSucceeded {
                    kind,
                    message: delete_success(kind).to_string(),
                },
                Err(e) => Action::DeleteFailed {
                    kind,
                    message: failure_message(delete_error(kind), &e),
                },
            }
        })
    }

    /// Forget handles of tasks that already reported back
    pub fn cleanup_finished_tasks(&mut self) -> Vec<TaskId> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(id, _)| *id)
            .collect();

        for task_id in &finished {
            self.tasks.remove(task_id);
        }

        finished
    }

    /// Whether a request of any kind is still in flight
    pub fn is_busy(&self) -> bool {
        self.tasks.values().any(|task| !task.handle.is_finished())
    }

    /// Descriptions of the running tasks, oldest first
    pub fn running(&self) -> Vec<String> {
        let mut tasks: Vec<&BackgroundTask> = self.tasks.values().collect();
        tasks.sort_by_key(|task| task.id);
        tasks
            .into_iter()
            .map(|task| format!("{} ({:.1}s)", task.description, task.started_at.elapsed().as_secs_f32()))
            .collect()
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel_all_tasks();
    }
}

fn failure_message(prefix: &str, error: &ApiError) -> String {
    format!("{}: {}", prefix, error.user_message())
}

fn load_error(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Pilot => ERROR_LOAD_PILOTS,
        EntityKind::Car => ERROR_LOAD_CARS,
        EntityKind::Race => ERROR_LOAD_RACES,
    }
}

fn delete_error(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Pilot => ERROR_DELETE_PILOT,
        EntityKind::Car => ERROR_DELETE_CAR,
        EntityKind::Race => ERROR_DELETE_RACE,
    }
}

fn submit_success(kind: EntityKind, created: bool) -> &'static str {
    match (kind, created) {
        (EntityKind::Pilot, true) => SUCCESS_PILOT_CREATED,
        (EntityKind::Pilot, false) => SUCCESS_PILOT_UPDATED,
        (EntityKind::Car, true) => SUCCESS_CAR_CREATED,
        (EntityKind::Car, false) => SUCCESS_CAR_UPDATED,
        (EntityKind::Race, true) => SUCCESS_RACE_CREATED,
        (EntityKind::Race, false) => SUCCESS_RACE_UPDATED,
    }
}

fn delete_success(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Pilot => SUCCESS_PILOT_DELETED,
        EntityKind::Car => SUCCESS_CAR_DELETED,
        EntityKind::Race => SUCCESS_RACE_DELETED,
    }
}

/// Multi-line summary shown by the view dialog
pub fn describe_record(target: &EditTarget) -> String {
    use crate::constants::{PLACEHOLDER_EMPTY, PLACEHOLDER_UNTITLED_RACE};

    let mut lines = Vec::new();
    match target {
        EditTarget::Pilot(pilot) => {
            lines.push(format!("Name:       {}", pilot.name));
            lines.push(format!("Age:        {}", pilot.age));
            lines.push(format!("Experience: {} years", pilot.experience));
            lines.push(String::new());
            lines.push(format!("Cars ({}):", pilot.cars.len()));
            lines.extend(
                pilot
                    .cars
                    .iter()
                    .map(|car| format!("  • {} ({} hp)", car.label(), car.power)),
            );
        }
        EditTarget::Car(car) => {
            lines.push(format!("Brand: {}", car.brand));
            lines.push(format!("Model: {}", car.model));
            lines.push(format!("Power: {} hp", car.power));
            let owner = car
                .owner
                .as_ref()
                .map(|owner| owner.name.clone())
                .unwrap_or_else(|| PLACEHOLDER_EMPTY.to_string());
            lines.push(format!("Owner: {}", owner));
        }
        EditTarget::Race(race) => {
            let name = if race.name.trim().is_empty() {
                PLACEHOLDER_UNTITLED_RACE.to_string()
            } else {
                race.name.clone()
            };
            let year = if race.year > 0 {
                race.year.to_string()
            } else {
                PLACEHOLDER_EMPTY.to_string()
            };
            lines.push(format!("Name: {}", name));
            lines.push(format!("Year: {}", year));
            lines.push(String::new());
            lines.push(format!("Pilots ({}):", race.pilots.len()));
            lines.extend(race.pilots.iter().map(|pilot| format!("  • {}", pilot.name)));
            lines.push(String::new());
            lines.push(format!("Cars ({}):", race.cars.len()));
            lines.extend(race.cars.iter().map(|car| format!("  • {}", car.label())));
        }
    }
    lines.join("\n")
}
