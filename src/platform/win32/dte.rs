// ── EnvDTE automation ─────────────────────────────────────────────────────────
//
// Implements the `automation` capability traits against a running Visual
// Studio through late-bound `IDispatch` calls.  The EnvDTE type library is
// never imported; every member is resolved by name at call time.
//
// Object model used:
//   DTE.Solution.FullName / DTE.Solution.Open(path)
//   DTE.UserControl = true
//   DTE.MainWindow.{Activate(), HWnd}
//   DTE.ItemOperations.OpenFile(path, viewKind)
//   DTE.ActiveDocument.Selection.GotoLine(line, select)

#![allow(unsafe_code)]

use windows::{
    core::{Interface, BSTR, GUID, IUnknown, PCWSTR, VARIANT},
    Win32::{
        Foundation::{HWND, S_OK},
        System::{
            Com::{
                CoCreateInstance, CreateClassMoniker, GetRunningObjectTable, IDispatch,
                IMoniker, CLSCTX_LOCAL_SERVER, DISPATCH_FLAGS, DISPATCH_METHOD,
                DISPATCH_PROPERTYGET, DISPATCH_PROPERTYPUT, DISPPARAMS,
            },
            Ole::DISPID_PROPERTYPUT,
        },
        UI::WindowsAndMessaging::SetForegroundWindow,
    },
};

use super::{com::ComApartment, wide};
use crate::{
    automation::{
        AutomationError, AutomationResult, ClassId, MainWindow, NativeHandle, Session,
        SessionHost, ViewKind,
    },
    error::Result,
};

/// `LOCALE_USER_DEFAULT`.
const LCID: u32 = 0x0400;

fn call_error(operation: &'static str) -> impl Fn(windows::core::Error) -> AutomationError {
    move |e| AutomationError::Call {
        operation,
        code: e.code().0 as u32,
    }
}

fn guid(class: &ClassId) -> GUID {
    GUID::from_u128(class.as_u128())
}

// ── Late binding ──────────────────────────────────────────────────────────────

/// An `IDispatch` with by-name member access.
#[derive(Clone)]
struct Dispatch(IDispatch);

impl Dispatch {
    fn from_variant(v: &VARIANT, operation: &'static str) -> AutomationResult<Self> {
        if v.is_empty() {
            return Err(AutomationError::Call { operation, code: 0 });
        }
        let unknown = IUnknown::try_from(v).map_err(call_error(operation))?;
        let dispatch = unknown.cast::<IDispatch>().map_err(call_error(operation))?;
        Ok(Self(dispatch))
    }

    fn dispid(&self, name: &'static str) -> AutomationResult<i32> {
        let name_w = wide(name);
        let names = [PCWSTR(name_w.as_ptr())];
        let mut id = 0i32;
        // SAFETY: `names` holds one valid null-terminated string that outlives
        // the call; `id` receives exactly one DISPID.
        unsafe {
            self.0
                .GetIDsOfNames(&GUID::zeroed(), names.as_ptr(), 1, LCID, &mut id)
        }
        .map_err(call_error(name))?;
        Ok(id)
    }

    /// Invoke `name`. `args` are in natural (left-to-right) order.
    fn invoke(
        &self,
        name: &'static str,
        flags: DISPATCH_FLAGS,
        args: Vec<VARIANT>,
    ) -> AutomationResult<VARIANT> {
        let id = self.dispid(name)?;

        // IDispatch expects arguments last-to-first.
        let mut rev: Vec<VARIANT> = args.into_iter().rev().collect();
        let mut put_id = DISPID_PROPERTYPUT;
        let params = DISPPARAMS {
            rgvarg: rev.as_mut_ptr(),
            rgdispidNamedArgs: if flags == DISPATCH_PROPERTYPUT {
                &mut put_id
            } else {
                std::ptr::null_mut()
            },
            cArgs: rev.len() as u32,
            cNamedArgs: u32::from(flags == DISPATCH_PROPERTYPUT),
        };

        let mut result = VARIANT::default();
        // SAFETY: `params` points into `rev` and `put_id`, both alive for the
        // duration of the call; `result` is a live out-parameter.
        unsafe {
            self.0.Invoke(
                id,
                &GUID::zeroed(),
                LCID,
                flags,
                &params,
                Some(&mut result as *mut _),
                None,
                None,
            )
        }
        .map_err(call_error(name))?;
        Ok(result)
    }

    fn get(&self, name: &'static str) -> AutomationResult<VARIANT> {
        self.invoke(name, DISPATCH_PROPERTYGET, Vec::new())
    }

    fn get_object(&self, name: &'static str) -> AutomationResult<Dispatch> {
        Dispatch::from_variant(&self.get(name)?, name)
    }

    fn get_string(&self, name: &'static str) -> AutomationResult<String> {
        let v = self.get(name)?;
        let s = BSTR::try_from(&v).map_err(call_error(name))?;
        Ok(s.to_string())
    }

    fn put(&self, name: &'static str, value: VARIANT) -> AutomationResult<()> {
        self.invoke(name, DISPATCH_PROPERTYPUT, vec![value]).map(drop)
    }

    fn call(&self, name: &'static str, args: Vec<VARIANT>) -> AutomationResult<VARIANT> {
        self.invoke(name, DISPATCH_METHOD | DISPATCH_PROPERTYGET, args)
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// One Visual Studio instance (`EnvDTE._DTE`).
pub struct DteSession(Dispatch);

/// `EnvDTE.Window` for the IDE's main frame.
pub struct DteWindow(Dispatch);

impl MainWindow for DteWindow {
    fn activate(&self) -> AutomationResult<()> {
        self.0.call("Activate", Vec::new()).map(drop)
    }

    fn native_handle(&self) -> AutomationResult<NativeHandle> {
        let v = self.0.get("HWnd")?;
        let raw = i32::try_from(&v).map_err(call_error("HWnd"))?;
        Ok(NativeHandle(raw as isize))
    }
}

impl Session for DteSession {
    type Window = DteWindow;

    fn workspace_path(&self) -> AutomationResult<String> {
        self.0.get_object("Solution")?.get_string("FullName")
    }

    fn open_workspace(&self, path: &str) -> AutomationResult<()> {
        self.0
            .get_object("Solution")?
            .call("Open", vec![VARIANT::from(BSTR::from(path))])
            .map(drop)
    }

    fn set_user_visible(&self, visible: bool) -> AutomationResult<()> {
        self.0.put("UserControl", VARIANT::from(visible))
    }

    fn main_window(&self) -> AutomationResult<DteWindow> {
        self.0.get_object("MainWindow").map(DteWindow)
    }

    fn open_document(&self, path: &str, view: ViewKind) -> AutomationResult<()> {
        self.0
            .get_object("ItemOperations")?
            .call(
                "OpenFile",
                vec![
                    VARIANT::from(BSTR::from(path)),
                    VARIANT::from(BSTR::from(view.as_str())),
                ],
            )
            .map(drop)
    }

    fn goto_line(&self, line: u32) -> AutomationResult<()> {
        let document = self
            .0
            .get_object("ActiveDocument")
            .map_err(|_| AutomationError::NoActiveDocument)?;
        let line = i32::try_from(line).unwrap_or(i32::MAX);
        document
            .get_object("Selection")?
            .call("GotoLine", vec![VARIANT::from(line), VARIANT::from(true)])
            .map(drop)
    }
}

// ── Host ──────────────────────────────────────────────────────────────────────

/// Access to Visual Studio instances through the running object table.
///
/// Owns the COM apartment for the current thread; sessions obtained from it
/// must be dropped first.
pub struct DteHost {
    _apartment: ComApartment,
}

impl DteHost {
    pub fn new() -> Result<Self> {
        Ok(Self {
            _apartment: ComApartment::init()?,
        })
    }
}

impl SessionHost for DteHost {
    type Session = DteSession;

    fn running_sessions(&self, class: &ClassId) -> AutomationResult<Vec<DteSession>> {
        // SAFETY: plain COM calls on interfaces owned by this function; the
        // apartment is initialised for the lifetime of `self`.
        let (table, monikers, class_moniker) = unsafe {
            let table = GetRunningObjectTable(0).map_err(|e| {
                tracing::debug!(error = %e, "GetRunningObjectTable failed");
                AutomationError::Unavailable("running object table")
            })?;
            let monikers = table.EnumRunning().map_err(call_error("EnumRunning"))?;
            let class_moniker =
                CreateClassMoniker(&guid(class)).map_err(call_error("CreateClassMoniker"))?;
            (table, monikers, class_moniker)
        };

        let mut sessions = Vec::new();
        loop {
            let mut slot: [Option<IMoniker>; 1] = [None];
            // SAFETY: `slot` has room for the single moniker requested.
            let hr = unsafe { monikers.Next(&mut slot, None) };
            let Some(moniker) = slot[0].take() else { break };
            if hr.is_err() {
                break;
            }

            // SAFETY: both monikers are live interfaces owned here.
            // S_FALSE means "not equal", so compare against S_OK exactly.
            if unsafe { moniker.IsEqual(&class_moniker) } != S_OK {
                continue;
            }
            // SAFETY: `moniker` came from this table's enumerator.
            let object = match unsafe { table.GetObject(&moniker) } {
                Ok(object) => object,
                Err(e) => {
                    tracing::debug!(error = %e, "running object vanished");
                    continue;
                }
            };
            match object.cast::<IDispatch>() {
                Ok(dispatch) => sessions.push(DteSession(Dispatch(dispatch))),
                Err(e) => tracing::debug!(error = %e, "running object is not automatable"),
            }
        }

        Ok(sessions)
    }

    fn create_instance(&self, class: &ClassId) -> AutomationResult<DteSession> {
        // SAFETY: out-of-process activation; no aggregation.
        let dispatch: IDispatch = unsafe {
            CoCreateInstance(&guid(class), None, CLSCTX_LOCAL_SERVER)
        }
        .map_err(call_error("CoCreateInstance"))?;
        Ok(DteSession(Dispatch(dispatch)))
    }

    fn set_foreground(&self, handle: NativeHandle) -> bool {
        // SAFETY: SetForegroundWindow tolerates stale or foreign handles and
        // simply returns FALSE.
        unsafe { SetForegroundWindow(HWND(handle.0 as *mut _)) }.as_bool()
    }
}
