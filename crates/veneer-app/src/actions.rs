//! The launcher's action vocabulary.
//!
//! Layout files bind dynamic buttons to free-form action names. This is the
//! set the launcher understands; anything else is ignored.

use veneer_layout::LayoutAction;

/// A command the launcher window can carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Start,
    Exit,
    ShowOptions,
    ToggleWindowMode,
    /// Flip the checked state of the clicked button itself.
    ToggleState,
    Minimize,
    OpenUrl(String),
    /// `Run`, `Launch` and `OpenFile` all start the argument as a process.
    Run(String),
    OpenFolder(String),
    Message(String),
}

impl HostCommand {
    /// Map an action to a command, ignoring case. `None` for blank or
    /// unknown names.
    pub fn parse(action: &LayoutAction) -> Option<Self> {
        if action.is_empty() {
            return None;
        }
        let arg = action.argument().to_string();
        let cmd = match action.name().trim().to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "exit" => Self::Exit,
            "options" | "showoptions" => Self::ShowOptions,
            "togglewindowmode" => Self::ToggleWindowMode,
            "togglestate" => Self::ToggleState,
            "minimize" => Self::Minimize,
            "openurl" => Self::OpenUrl(arg),
            "run" | "launch" | "openfile" => Self::Run(arg),
            "openfolder" => Self::OpenFolder(arg),
            "message" => Self::Message(arg),
            other => {
                log::debug!("Unknown layout action '{other}' -- ignored");
                return None;
            },
        };
        Some(cmd)
    }
}
