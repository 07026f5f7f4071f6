use pal_auth::Navigator;
use pal_core::Route;

use crate::cli::GlobalFlags;

/// Reports redirects on stderr instead of switching views.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    quiet: bool,
    last: Option<Route>,
}

impl TerminalNavigator {
    pub fn new(flags: &GlobalFlags) -> Self {
        Self {
            quiet: flags.quiet,
            last: None,
        }
    }

    /// Most recent redirect target.
    pub const fn last(&self) -> Option<Route> {
        self.last
    }
}

impl Navigator for TerminalNavigator {
    fn navigate_to(&mut self, route: Route) {
        if !self.quiet {
            eprintln!("-> {route}");
        }
        self.last = Some(route);
    }
}

/// Hint printed when a redirect lands on `route`.
pub const fn hint_for(route: Route) -> &'static str {
    match route {
        Route::Login => "not logged in; run `pal auth login` first",
        Route::Register => "run `pal auth register` to create an account",
        Route::Chat => "already logged in; run `pal chat repl` to start chatting",
        Route::Landing => "run `pal auth login` or `pal auth register`",
    }
}
