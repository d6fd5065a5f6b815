//! `PerformanceTiming`: navigation timing marks in epoch milliseconds.
//!
//! There is no real network underneath, so marks are simulated from the wall
//! clock when the object is created: each phase sits at a fixed offset after
//! `navigationStart`, and phases that never happen here (unload, redirect,
//! TLS) read 0. The host may record real marks later; every holder of the
//! object sees them.

use std::any::Any;

use tracing::trace;

use super::with_host;
use crate::runner::clock::epoch_now_ms;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{object_from_entries, JsHostObject, JsObject, ObjectBase, ObjectType};
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::{BuiltInObject, EvalContext};

pub const TIMING_CLASS: &str = "PerformanceTiming";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingAttribute {
    NavigationStart,
    UnloadEventStart,
    UnloadEventEnd,
    RedirectStart,
    RedirectEnd,
    FetchStart,
    DomainLookupStart,
    DomainLookupEnd,
    ConnectStart,
    ConnectEnd,
    SecureConnectionStart,
    RequestStart,
    ResponseStart,
    ResponseEnd,
    DomLoading,
    DomInteractive,
    DomContentLoadedEventStart,
    DomContentLoadedEventEnd,
    DomComplete,
    LoadEventStart,
    LoadEventEnd,
}

impl TimingAttribute {
    pub const ALL: [TimingAttribute; 21] = [
        TimingAttribute::NavigationStart,
        TimingAttribute::UnloadEventStart,
        TimingAttribute::UnloadEventEnd,
        TimingAttribute::RedirectStart,
        TimingAttribute::RedirectEnd,
        TimingAttribute::FetchStart,
        TimingAttribute::DomainLookupStart,
        TimingAttribute::DomainLookupEnd,
        TimingAttribute::ConnectStart,
        TimingAttribute::ConnectEnd,
        TimingAttribute::SecureConnectionStart,
        TimingAttribute::RequestStart,
        TimingAttribute::ResponseStart,
        TimingAttribute::ResponseEnd,
        TimingAttribute::DomLoading,
        TimingAttribute::DomInteractive,
        TimingAttribute::DomContentLoadedEventStart,
        TimingAttribute::DomContentLoadedEventEnd,
        TimingAttribute::DomComplete,
        TimingAttribute::LoadEventStart,
        TimingAttribute::LoadEventEnd,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TimingAttribute::NavigationStart => "navigationStart",
            TimingAttribute::UnloadEventStart => "unloadEventStart",
            TimingAttribute::UnloadEventEnd => "unloadEventEnd",
            TimingAttribute::RedirectStart => "redirectStart",
            TimingAttribute::RedirectEnd => "redirectEnd",
            TimingAttribute::FetchStart => "fetchStart",
            TimingAttribute::DomainLookupStart => "domainLookupStart",
            TimingAttribute::DomainLookupEnd => "domainLookupEnd",
            TimingAttribute::ConnectStart => "connectStart",
            TimingAttribute::ConnectEnd => "connectEnd",
            TimingAttribute::SecureConnectionStart => "secureConnectionStart",
            TimingAttribute::RequestStart => "requestStart",
            TimingAttribute::ResponseStart => "responseStart",
            TimingAttribute::ResponseEnd => "responseEnd",
            TimingAttribute::DomLoading => "domLoading",
            TimingAttribute::DomInteractive => "domInteractive",
            TimingAttribute::DomContentLoadedEventStart => "domContentLoadedEventStart",
            TimingAttribute::DomContentLoadedEventEnd => "domContentLoadedEventEnd",
            TimingAttribute::DomComplete => "domComplete",
            TimingAttribute::LoadEventStart => "loadEventStart",
            TimingAttribute::LoadEventEnd => "loadEventEnd",
        }
    }

    /// Simulated offset from `navigationStart`; `None` for phases that read 0.
    fn simulated_offset(&self) -> Option<i64> {
        match self {
            TimingAttribute::NavigationStart => Some(0),
            TimingAttribute::UnloadEventStart
            | TimingAttribute::UnloadEventEnd
            | TimingAttribute::RedirectStart
            | TimingAttribute::RedirectEnd
            | TimingAttribute::SecureConnectionStart => None,
            TimingAttribute::FetchStart => Some(1),
            TimingAttribute::DomainLookupStart => Some(2),
            TimingAttribute::DomainLookupEnd => Some(4),
            TimingAttribute::ConnectStart => Some(4),
            TimingAttribute::ConnectEnd => Some(6),
            TimingAttribute::RequestStart => Some(8),
            TimingAttribute::ResponseStart => Some(14),
            TimingAttribute::ResponseEnd => Some(18),
            TimingAttribute::DomLoading => Some(19),
            TimingAttribute::DomInteractive => Some(30),
            TimingAttribute::DomContentLoadedEventStart => Some(31),
            TimingAttribute::DomContentLoadedEventEnd => Some(33),
            TimingAttribute::DomComplete => Some(38),
            TimingAttribute::LoadEventStart => Some(39),
            TimingAttribute::LoadEventEnd => Some(SIMULATED_LOAD_MS),
        }
    }
}

/// Distance between `navigationStart` and `loadEventEnd`.
pub const SIMULATED_LOAD_MS: i64 = 41;

#[derive(Clone)]
pub struct PerformanceTiming {
    base: ObjectBase,
    marks: [i64; 21],
}

impl PerformanceTiming {
    /// Marks for a page whose load finished just now.
    pub fn new() -> Self {
        Self::starting_at(epoch_now_ms() - SIMULATED_LOAD_MS)
    }

    pub fn starting_at(navigation_start: i64) -> Self {
        let mut marks = [0; 21];
        for attr in TimingAttribute::ALL.iter() {
            if let Some(offset) = attr.simulated_offset() {
                marks[*attr as usize] = navigation_start + offset;
            }
        }
        PerformanceTiming {
            base: ObjectBase::new(),
            marks,
        }
    }

    pub fn get(&self, attr: TimingAttribute) -> i64 {
        self.marks[attr as usize]
    }

    /// Overwrites one mark.
    pub fn record(&mut self, attr: TimingAttribute, epoch_ms: i64) {
        trace!(mark = attr.name(), epoch_ms, "recording timing mark");
        self.marks[attr as usize] = epoch_ms;
    }

    pub fn to_json(&self) -> JsValue {
        JsValue::Object(object_from_entries(
            TimingAttribute::ALL
                .iter()
                .map(|attr| (attr.name().to_string(), int(self.get(*attr)))),
        ))
    }
}

impl Default for PerformanceTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl JsObject for PerformanceTiming {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.base
    }

    fn as_super_trait(&self) -> &dyn JsObject {
        self
    }

    fn as_super_trait_mut(&mut self) -> &mut dyn JsObject {
        self
    }

    fn class_name(&self) -> &str {
        TIMING_CLASS
    }

    fn clone_object(&self) -> ObjectType {
        ObjectType::Host(Box::new(self.clone()))
    }
}

impl JsHostObject for PerformanceTiming {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn int(n: i64) -> JsValue {
    JsValue::Number(JsNumberType::Integer(n))
}

pub fn register(registry: &mut BuiltInRegistry) {
    let mut timing = BuiltInObject::new(TIMING_CLASS).add_method("toJSON", timing_to_json);
    for attr in TimingAttribute::ALL.iter().copied() {
        timing = timing.add_plugin_getter(attr.name(), move |_ctx, this, _args| {
            with_host(&this, TIMING_CLASS, attr.name(), |t: &PerformanceTiming| {
                int(t.get(attr))
            })
        });
    }
    registry.register_object(timing);
}

fn timing_to_json(
    _ctx: &mut EvalContext,
    this: JsValue,
    _args: Vec<JsValue>,
) -> Result<JsValue, JErrorType> {
    with_host(&this, TIMING_CLASS, "toJSON", |t: &PerformanceTiming| t.to_json())
}
