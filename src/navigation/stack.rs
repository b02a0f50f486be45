//! Screen routes and the navigation stack.

use std::fmt;

/// A screen in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Signup,
    Login,
    Home,
}

impl Route {
    /// Screen name as registered in the navigator.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Signup => "Signup",
            Route::Login => "Login",
            Route::Home => "Home",
        }
    }

    /// Whether the screen needs a logged-in user.
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stack of visited screens. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    routes: Vec<Route>,
}

impl NavigationStack {
    /// The first registered screen.
    pub const INITIAL_ROUTE: Route = Route::Signup;

    /// Create a stack showing `initial`.
    pub fn new(initial: Route) -> Self {
        Self {
            routes: vec![initial],
        }
    }

    /// Screen on top of the stack.
    pub fn current(&self) -> Route {
        // The stack is never empty: `go_back` refuses to pop the root.
        self.routes[self.routes.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.routes.len()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Go to `route`.
    ///
    /// If the route is already on the stack, everything above it is popped.
    /// Otherwise it is pushed.
    pub fn navigate(&mut self, route: Route) {
        match self.routes.iter().position(|r| *r == route) {
            Some(idx) => self.routes.truncate(idx + 1),
            None => self.routes.push(route),
        }
    }

    /// Pop the top screen. Returns `false` at the root.
    pub fn go_back(&mut self) -> bool {
        if self.routes.len() > 1 {
            self.routes.pop();
            true
        } else {
            false
        }
    }

    /// Replace the whole stack with `route`.
    pub fn reset(&mut self, route: Route) {
        self.routes.clear();
        self.routes.push(route);
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Self::INITIAL_ROUTE)
    }
}
