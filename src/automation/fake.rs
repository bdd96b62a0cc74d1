// In-process stand-ins for the automation capabilities, shared by the
// locator, navigation and editor tests.  Clones share state so a test can
// inspect what happened to a session after handing it to the code under test.

use std::{cell::RefCell, rc::Rc};

use super::{
    AutomationError, AutomationResult, ClassId, MainWindow, NativeHandle, Session, SessionHost,
    ViewKind,
};

fn call_failed(operation: &'static str) -> AutomationError {
    AutomationError::Call {
        operation,
        code: 0x8000_4005,
    }
}

#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub(crate) workspace: Option<String>,
    pub(crate) user_visible: bool,
    /// `main_window()` succeeds once this many calls have failed. `None`
    /// means the window never becomes available.
    pub(crate) ready_after: Option<u32>,
    pub(crate) window_polls: u32,
    pub(crate) fail_open_workspace: bool,
    pub(crate) fail_open_document: bool,
    pub(crate) fail_goto_line: bool,
    pub(crate) fail_activate: bool,
    pub(crate) opened_documents: Vec<String>,
    pub(crate) goto_lines: Vec<u32>,
    pub(crate) activations: u32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeSession {
    pub(crate) state: Rc<RefCell<SessionState>>,
}

impl FakeSession {
    /// A session that already has `workspace` loaded and a main window.
    pub(crate) fn ready(workspace: &str) -> Self {
        let s = Self::default();
        {
            let mut st = s.state.borrow_mut();
            st.workspace = Some(workspace.to_owned());
            st.ready_after = Some(0);
        }
        s
    }

    pub(crate) fn with(self, f: impl FnOnce(&mut SessionState)) -> Self {
        f(&mut self.state.borrow_mut());
        self
    }

    pub(crate) fn is(&self, other: &FakeSession) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

pub(crate) struct FakeWindow {
    state: Rc<RefCell<SessionState>>,
}

impl MainWindow for FakeWindow {
    fn activate(&self) -> AutomationResult<()> {
        let mut st = self.state.borrow_mut();
        if st.fail_activate {
            return Err(call_failed("Window.Activate"));
        }
        st.activations += 1;
        Ok(())
    }

    fn native_handle(&self) -> AutomationResult<NativeHandle> {
        Ok(NativeHandle(0x1234))
    }
}

impl Session for FakeSession {
    type Window = FakeWindow;

    fn workspace_path(&self) -> AutomationResult<String> {
        self.state
            .borrow()
            .workspace
            .clone()
            .ok_or_else(|| call_failed("Solution.FullName"))
    }

    fn open_workspace(&self, path: &str) -> AutomationResult<()> {
        let mut st = self.state.borrow_mut();
        if st.fail_open_workspace {
            return Err(call_failed("Solution.Open"));
        }
        st.workspace = Some(path.to_owned());
        Ok(())
    }

    fn set_user_visible(&self, visible: bool) -> AutomationResult<()> {
        self.state.borrow_mut().user_visible = visible;
        Ok(())
    }

    fn main_window(&self) -> AutomationResult<FakeWindow> {
        let mut st = self.state.borrow_mut();
        let polls = st.window_polls;
        st.window_polls += 1;
        match st.ready_after {
            Some(n) if polls >= n => Ok(FakeWindow {
                state: Rc::clone(&self.state),
            }),
            _ => Err(call_failed("DTE.MainWindow")),
        }
    }

    fn open_document(&self, path: &str, _view: ViewKind) -> AutomationResult<()> {
        let mut st = self.state.borrow_mut();
        if st.fail_open_document {
            return Err(call_failed("ItemOperations.OpenFile"));
        }
        st.opened_documents.push(path.to_owned());
        Ok(())
    }

    fn goto_line(&self, line: u32) -> AutomationResult<()> {
        let mut st = self.state.borrow_mut();
        if st.fail_goto_line {
            return Err(AutomationError::NoActiveDocument);
        }
        st.goto_lines.push(line);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeHost {
    pub(crate) running: Vec<(ClassId, FakeSession)>,
    /// Handed out by `create_instance`; `None` makes creation fail.
    pub(crate) launch: Option<FakeSession>,
    pub(crate) table_unavailable: bool,
    pub(crate) launches: RefCell<u32>,
    pub(crate) foreground: RefCell<Vec<NativeHandle>>,
}

impl SessionHost for FakeHost {
    type Session = FakeSession;

    fn running_sessions(&self, class: &ClassId) -> AutomationResult<Vec<FakeSession>> {
        if self.table_unavailable {
            return Err(AutomationError::Unavailable("running object table"));
        }
        Ok(self
            .running
            .iter()
            .filter(|(c, _)| c == class)
            .map(|(_, s)| s.clone())
            .collect())
    }

    fn create_instance(&self, _class: &ClassId) -> AutomationResult<FakeSession> {
        *self.launches.borrow_mut() += 1;
        self.launch
            .clone()
            .ok_or_else(|| call_failed("CoCreateInstance"))
    }

    fn set_foreground(&self, handle: NativeHandle) -> bool {
        self.foreground.borrow_mut().push(handle);
        true
    }
}
