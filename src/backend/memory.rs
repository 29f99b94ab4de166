//! In-memory `ResourceStore` for service and router tests

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{BackendError, FormPayload, ResourceStore, Result};

/// Records every call and keeps items as JSON objects
pub struct MemoryStore<T> {
    path: String,
    items: Mutex<Vec<Value>>,
    calls: Mutex<Vec<String>>,
    forms: Mutex<Vec<FormPayload>>,
    failing: AtomicBool,
    next_id: AtomicUsize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MemoryStore<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(path: &str) -> Self {
        Self::with_items(path, Vec::new())
    }

    pub fn with_items(path: &str, items: Vec<Value>) -> Self {
        Self {
            path: format!("/{}", path.trim_matches('/')),
            items: Mutex::new(items),
            calls: Mutex::new(Vec::new()),
            forms: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            next_id: AtomicUsize::new(1),
            _marker: PhantomData,
        }
    }

    pub fn shared(path: &str, items: Vec<Value>) -> Arc<Self> {
        Arc::new(Self::with_items(path, items))
    }

    /// Make every following call fail with a 500
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn last_form(&self) -> Option<FormPayload> {
        self.forms.lock().unwrap().last().cloned()
    }

    pub fn items(&self) -> Vec<Value> {
        self.items.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendError::Status {
                path: self.path.clone(),
                status: 500,
                message: "backend unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn decode(&self, value: Value) -> Result<T> {
        serde_json::from_value(value).map_err(|e| BackendError::Decode {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn form_to_value(form: &FormPayload) -> Value {
        let mut object = Map::new();
        for (name, value) in form.fields() {
            object.insert(name.to_string(), Value::String(value.to_string()));
        }
        for (name, file) in form.files() {
            object.insert(name.to_string(), Value::String(format!("uploads/{}", file.file_name)));
        }
        Value::Object(object)
    }

    fn insert(&self, body: Value) -> Result<Option<T>> {
        let mut object = match body {
            Value::Object(object) => object,
            _ => Map::new(),
        };
        let id = format!("mem-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        object.insert("id".to_string(), Value::String(id));
        let value = Value::Object(object);

        self.items.lock().unwrap().push(value.clone());
        self.decode(value).map(Some)
    }

    fn merge(&self, id: &str, body: Value) -> Result<Option<T>> {
        let mut items = self.items.lock().unwrap();
        let Some(item) = items.iter_mut().find(|item| matches_id(item, id)) else {
            return Err(BackendError::Status {
                path: format!("{}/{}", self.path, id),
                status: 404,
                message: "Not found".to_string(),
            });
        };

        if let (Value::Object(target), Value::Object(patch)) = (&mut *item, body) {
            target.extend(patch);
        }
        let value = item.clone();
        drop(items);
        self.decode(value).map(Some)
    }
}

fn matches_id(item: &Value, id: &str) -> bool {
    ["id", "_id"]
        .iter()
        .any(|key| item.get(*key).and_then(Value::as_str) == Some(id))
}

#[async_trait]
impl<T> ResourceStore<T> for MemoryStore<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    fn path(&self) -> &str {
        &self.path
    }

    async fn list(&self) -> Result<Vec<T>> {
        self.record("list".to_string())?;
        self.items().into_iter().map(|item| self.decode(item)).collect()
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>> {
        self.record(format!("get:{}", id))?;
        self.items()
            .into_iter()
            .find(|item| matches_id(item, id))
            .map(|item| self.decode(item))
            .transpose()
    }

    async fn create(&self, body: Value) -> Result<Option<T>> {
        self.record("create".to_string())?;
        self.insert(body)
    }

    async fn create_form(&self, form: FormPayload) -> Result<Option<T>> {
        self.record("create_form".to_string())?;
        let body = Self::form_to_value(&form);
        self.forms.lock().unwrap().push(form);
        self.insert(body)
    }

    async fn update(&self, id: &str, body: Value) -> Result<Option<T>> {
        self.record(format!("update:{}", id))?;
        self.merge(id, body)
    }

    async fn update_form(&self, id: &str, form: FormPayload) -> Result<Option<T>> {
        self.record(format!("update_form:{}", id))?;
        let body = Self::form_to_value(&form);
        self.forms.lock().unwrap().push(form);
        self.merge(id, body)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.record(format!("delete:{}", id))?;
        self.items.lock().unwrap().retain(|item| !matches_id(item, id));
        Ok(())
    }
}
