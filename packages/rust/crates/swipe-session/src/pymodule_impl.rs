//! Python bindings for swipe-session.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use swipe_types::Intent;

use crate::InteractionTracker;

/// Python-exposed interaction tracker.
#[pyclass]
pub struct PyInteractionTracker {
    inner: InteractionTracker,
}

#[pymethods]
impl PyInteractionTracker {
    #[new]
    fn new(session_id: &str) -> Self {
        Self {
            inner: InteractionTracker::new(session_id),
        }
    }

    fn record(&mut self, intent: &str) -> PyResult<()> {
        let intent: Intent = intent
            .parse()
            .map_err(|e: swipe_types::CurationError| PyValueError::new_err(e.to_string()))?;
        self.inner.record(intent);
        Ok(())
    }

    fn get_stats(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let stats = self.inner.get_stats();
        let counts = PyDict::new(py);
        for intent in Intent::ALL {
            counts.set_item(intent.as_str(), stats.count(intent))?;
        }
        let dict = PyDict::new(py);
        dict.set_item("counts", counts)?;
        dict.set_item("total", stats.total)?;
        dict.set_item("engagement", stats.engagement.as_str())?;
        if let Some(at) = stats.last_action_at {
            dict.set_item("last_action_at", at.to_rfc3339())?;
        }
        Ok(dict.into())
    }

    fn has_performed_calendar_action(&self) -> bool {
        self.inner.has_performed_calendar_action()
    }

    fn has_performed_any_action(&self) -> bool {
        self.inner.has_performed_any_action()
    }

    fn reset(&mut self) -> usize {
        self.inner.reset()
    }

    #[getter]
    fn session_id(&self) -> &str {
        self.inner.session_id()
    }
}
