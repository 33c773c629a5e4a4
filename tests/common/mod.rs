//! In-memory race server shared by the UI flow tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pitwall::api::{ApiError, RaceApi};
use pitwall::config::Config;
use pitwall::logger::Logger;
use pitwall::models::{
    Car, CarPayload, EntityId, Page, PageMeta, PageRequest, Pilot, PilotPayload, Race, RacePayload,
};
use pitwall::ui::AppComponent;

/// Records every call and serves pages out of fixed vectors.
#[derive(Default)]
pub struct FakeApi {
    pub pilots: Mutex<Vec<Pilot>>,
    pub cars: Mutex<Vec<Car>>,
    pub races: Mutex<Vec<Race>>,
    pub calls: Mutex<Vec<String>>,
    /// When set, every mutation fails with this HTTP error
    pub fail_writes: Mutex<Option<(u16, String)>>,
    /// When set, every list and single-record read fails with this HTTP error
    pub fail_reads: Mutex<Option<(u16, String)>>,
}

impl FakeApi {
    pub fn with_pilots(count: usize) -> Arc<Self> {
        let api = FakeApi::default();
        *api.pilots.lock().unwrap() = (1..=count as EntityId)
            .map(|id| Pilot {
                id,
                name: format!("Pilot {}", id),
                age: 20 + id as i32,
                experience: id as i32,
                cars: Vec::new(),
            })
            .collect();
        Arc::new(api)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls().into_iter().filter(|call| call.starts_with(prefix)).collect()
    }

    pub fn fail_writes_with(&self, status: u16, message: &str) {
        *self.fail_writes.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn fail_reads_with(&self, status: u16, message: &str) {
        *self.fail_reads.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn with_cars(self: Arc<Self>, count: usize) -> Arc<Self> {
        *self.cars.lock().unwrap() = (1..=count as EntityId)
            .map(|id| Car {
                id,
                brand: format!("Brand {}", id),
                model: format!("M{}", id),
                power: 500 + id as i32,
                owner: None,
            })
            .collect();
        self
    }

    fn read_result(&self) -> Result<(), ApiError> {
        match self.fail_reads.lock().unwrap().clone() {
            Some((status, message)) => Err(ApiError::Http { status, message }),
            None => Ok(()),
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn write_result(&self) -> Result<(), ApiError> {
        match self.fail_writes.lock().unwrap().clone() {
            Some((status, message)) => Err(ApiError::Http { status, message }),
            None => Ok(()),
        }
    }
}

fn page_of<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let size = request.size.max(1) as usize;
    let total_pages = items.len().div_ceil(size) as u32;
    let content = items
        .iter()
        .skip(request.page as usize * size)
        .take(size)
        .cloned()
        .collect();
    Page {
        content,
        page: PageMeta {
            size: request.size,
            number: request.page,
            total_elements: items.len() as u64,
            total_pages,
        },
    }
}

fn not_found(kind: &str, id: EntityId) -> ApiError {
    ApiError::Http {
        status: 404,
        message: format!("{} {} not found", kind, id),
    }
}

#[async_trait]
impl RaceApi for FakeApi {
    fn endpoint(&self) -> &str {
        "http://fake"
    }

    async fn list_pilots(&self, request: PageRequest) -> Result<Page<Pilot>, ApiError> {
        self.record(format!("GET /api/pilots?page={}&size={}", request.page, request.size));
        self.read_result()?;
        Ok(page_of(&self.pilots.lock().unwrap(), request))
    }

    async fn get_pilot(&self, id: EntityId) -> Result<Pilot, ApiError> {
        self.record(format!("GET /api/pilots/{}", id));
        self.read_result()?;
        let found = self.pilots.lock().unwrap().iter().find(|p| p.id == id).cloned();
        found.ok_or_else(|| not_found("Pilot", id))
    }

    async fn create_pilot(&self, payload: &PilotPayload) -> Result<(), ApiError> {
        self.record(format!("POST /api/pilots {}", payload.name));
        self.write_result()
    }

    async fn update_pilot(&self, id: EntityId, payload: &PilotPayload) -> Result<(), ApiError> {
        self.record(format!("PUT /api/pilots/{} {}", id, payload.name));
        self.write_result()
    }

    async fn delete_pilot(&self, id: EntityId) -> Result<(), ApiError> {
        self.record(format!("DELETE /api/pilots/{}", id));
        self.write_result()?;
        self.pilots.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn list_cars(&self, request: PageRequest) -> Result<Page<Car>, ApiError> {
        self.record(format!("GET /api/cars?page={}&size={}", request.page, request.size));
        self.read_result()?;
        Ok(page_of(&self.cars.lock().unwrap(), request))
    }

    async fn get_car(&self, id: EntityId) -> Result<Car, ApiError> {
        self.record(format!("GET /api/cars/{}", id));
        self.read_result()?;
        let found = self.cars.lock().unwrap().iter().find(|c| c.id == id).cloned();
        found.ok_or_else(|| not_found("Car", id))
    }

    async fn create_car(&self, payload: &CarPayload) -> Result<(), ApiError> {
        self.record(format!("POST /api/cars {} {}", payload.brand, payload.owner_id));
        self.write_result()
    }

    async fn update_car(&self, id: EntityId, payload: &CarPayload) -> Result<(), ApiError> {
        self.record(format!("PUT /api/cars/{} {}", id, payload.brand));
        self.write_result()
    }

    async fn delete_car(&self, id: EntityId) -> Result<(), ApiError> {
        self.record(format!("DELETE /api/cars/{}", id));
        self.write_result()?;
        self.cars.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn list_races(&self, request: PageRequest) -> Result<Page<Race>, ApiError> {
        self.record(format!("GET /api/races?page={}&size={}", request.page, request.size));
        self.read_result()?;
        Ok(page_of(&self.races.lock().unwrap(), request))
    }

    async fn get_race(&self, id: EntityId) -> Result<Race, ApiError> {
        self.record(format!("GET /api/races/{}", id));
        self.read_result()?;
        let found = self.races.lock().unwrap().iter().find(|r| r.id == id).cloned();
        found.ok_or_else(|| not_found("Race", id))
    }

    async fn create_race(&self, payload: &RacePayload) -> Result<(), ApiError> {
        self.record(format!(
            "POST /api/races {} {:?} {:?}",
            payload.name, payload.pilot_ids, payload.car_ids
        ));
        self.write_result()
    }

    async fn update_race(&self, id: EntityId, payload: &RacePayload) -> Result<(), ApiError> {
        self.record(format!("PUT /api/races/{} {}", id, payload.name));
        self.write_result()
    }

    async fn delete_race(&self, id: EntityId) -> Result<(), ApiError> {
        self.record(format!("DELETE /api/races/{}", id));
        self.write_result()?;
        self.races.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

/// App on the pilots tab, started and settled against `api`
pub async fn started_app(api: Arc<FakeApi>) -> AppComponent {
    let mut app = AppComponent::new(api, &Config::default(), Logger::new());
    app.start();
    app.settle().await;
    app
}
