use super::store::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Predict,
}

impl Route {
    /// Root and unknown paths land on the login page.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/signup" => Route::Signup,
            "/predict" => Route::Predict,
            _ => Route::Login,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Predict => "/predict",
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Predict)
    }
}

pub fn is_authorized(session: &Session) -> bool {
    session.token().is_some_and(|t| !t.is_empty())
}

/// The route that may actually render for `requested`. Evaluated on every
/// render, never cached.
pub fn guard(requested: Route, session: &Session) -> Route {
    if requested.is_protected() && !is_authorized(session) {
        log::info!("Redirecting {} to login", requested.path());
        Route::Login
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_follows_the_token() {
        assert!(!is_authorized(&Session::absent()));
        assert!(is_authorized(&Session::new("tok1", "a@b.com")));
        assert!(!is_authorized(&Session::new("", "a@b.com")));
        assert_eq!(guard(Route::Predict, &Session::new("", "a@b.com")), Route::Login);
    }

    #[test]
    fn protected_route_redirects_when_absent() {
        assert_eq!(guard(Route::Predict, &Session::absent()), Route::Login);
        assert_eq!(guard(Route::Signup, &Session::absent()), Route::Signup);
        let session = Session::new("tok1", "a@b.com");
        assert_eq!(guard(Route::Predict, &session), Route::Predict);
    }

    #[test]
    fn paths_resolve() {
        assert_eq!(Route::from_path("/"), Route::Login);
        assert_eq!(Route::from_path("/predict/"), Route::Predict);
        assert_eq!(Route::from_path("/nowhere"), Route::Login);
        assert_eq!(Route::from_path(Route::Signup.path()), Route::Signup);
    }
}
