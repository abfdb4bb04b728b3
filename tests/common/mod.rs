#![allow(dead_code)]

use {
    mccs_script::{DisplayApi, FeatureCode, OsError, PhysicalMonitorRecord},
    std::cell::{Cell, RefCell},
};

/// A physical monitor handle handed out by [`FakeDisplays`].
///
/// Ids are the monitor's position across all outputs, flattened.
#[derive(Debug, PartialEq, Eq)]
pub struct FakeHandle(pub usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Enumerate,
    Count(usize),
    Fetch(usize, u32),
    Release(usize),
    SetFeature(usize, FeatureCode, u32),
}

/// A scripted display API that records every call made to it.
#[derive(Default)]
pub struct FakeDisplays {
    outputs: Vec<Vec<&'static str>>,
    fail_enumerate: bool,
    fail_query: Option<usize>,
    fail_fetch: Option<usize>,
    fail_release: Option<usize>,
    fail_set_feature: Option<usize>,
    set_feature_calls: Cell<usize>,
    calls: RefCell<Vec<Call>>,
}

impl FakeDisplays {
    /// One logical display per entry, each backed by the listed physical monitors.
    pub fn new(outputs: &[&[&'static str]]) -> Self {
        Self {
            outputs: outputs.iter().map(|monitors| monitors.to_vec()).collect(),
            ..Default::default()
        }
    }

    pub fn failing_enumeration() -> Self {
        Self {
            fail_enumerate: true,
            ..Self::new(&[&["DELL U2417H"]])
        }
    }

    /// Fail the physical monitor count query for `output`.
    pub fn fail_query(mut self, output: usize) -> Self {
        self.fail_query = Some(output);
        self
    }

    /// Fail the physical monitor fetch for `output`.
    pub fn fail_fetch(mut self, output: usize) -> Self {
        self.fail_fetch = Some(output);
        self
    }

    /// Fail every release of the handle with id `id`.
    pub fn fail_release(mut self, id: usize) -> Self {
        self.fail_release = Some(id);
        self
    }

    /// Fail the `nth` (0-based) VCP transaction.
    pub fn fail_set_feature(mut self, nth: usize) -> Self {
        self.fail_set_feature = Some(nth);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear()
    }

    pub fn releases(&self) -> Vec<usize> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Release(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn set_features(&self) -> Vec<(usize, FeatureCode, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SetFeature(id, code, value) => Some((id, code, value)),
                _ => None,
            })
            .collect()
    }

    pub fn queries(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Count(..) | Call::Fetch(..)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call)
    }

    fn first_id(&self, output: usize) -> usize {
        self.outputs[..output].iter().map(Vec::len).sum()
    }
}

fn os_error() -> OsError {
    OsError::new(0x8007001f_u32 as i32, "A device attached to the system is not functioning.")
}

impl DisplayApi for FakeDisplays {
    type Output = usize;
    type Handle = FakeHandle;

    fn enumerate_outputs(&self) -> Result<Vec<usize>, OsError> {
        self.record(Call::Enumerate);
        match self.fail_enumerate {
            true => Err(os_error()),
            false => Ok((0..self.outputs.len()).collect()),
        }
    }

    fn physical_monitor_count(&self, output: usize) -> Result<u32, OsError> {
        self.record(Call::Count(output));
        match self.fail_query == Some(output) {
            true => Err(os_error()),
            false => Ok(self.outputs[output].len() as u32),
        }
    }

    fn physical_monitors(&self, output: usize, count: u32) -> Result<Vec<PhysicalMonitorRecord<FakeHandle>>, OsError> {
        self.record(Call::Fetch(output, count));
        if self.fail_fetch == Some(output) {
            return Err(os_error())
        }
        let first = self.first_id(output);
        Ok(self.outputs[output]
            .iter()
            .take(count as usize)
            .enumerate()
            .map(|(i, description)| PhysicalMonitorRecord {
                handle: FakeHandle(first + i),
                description: description.to_string(),
            })
            .collect())
    }

    fn destroy_physical_monitor(&self, handle: &FakeHandle) -> Result<(), OsError> {
        self.record(Call::Release(handle.0));
        match self.fail_release == Some(handle.0) {
            true => Err(os_error()),
            false => Ok(()),
        }
    }

    fn set_vcp_feature(&self, handle: &FakeHandle, code: FeatureCode, value: u32) -> Result<(), OsError> {
        self.record(Call::SetFeature(handle.0, code, value));
        let nth = self.set_feature_calls.get();
        self.set_feature_calls.set(nth + 1);
        match self.fail_set_feature == Some(nth) {
            true => Err(os_error()),
            false => Ok(()),
        }
    }
}
