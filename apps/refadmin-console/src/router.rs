//! Route table and navigation bar.

use refadmin_core::session::LOGIN_PATH;

/// A page of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    UserReferrals,
    UserData,
    ChangeReferralCode,
    SendNotification,
    QuizForm,
    ReferrerStats,
}

const ROUTES: &[(&str, Route)] = &[
    ("/login", Route::Login),
    ("/user-referrals", Route::UserReferrals),
    ("/user-data", Route::UserData),
    ("/crc", Route::ChangeReferralCode),
    ("/sendNoti", Route::SendNotification),
    ("/quizForm", Route::QuizForm),
    ("/referrer_stats", Route::ReferrerStats),
];

impl Route {
    pub fn path(self) -> &'static str {
        ROUTES
            .iter()
            .find(|(_, route)| *route == self)
            .map(|(path, _)| *path)
            .unwrap_or(LOGIN_PATH)
    }

    /// Navigation bar label.
    pub fn label(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::UserReferrals => "User Referrals",
            Route::UserData => "User Data",
            Route::ChangeReferralCode => "Change Referral Code",
            Route::SendNotification => "Send Notification",
            Route::QuizForm => "Quiz Form",
            Route::ReferrerStats => "Referrer Stats",
        }
    }

    /// Everything except the login page sits behind the auth gate.
    pub fn is_gated(self) -> bool {
        !matches!(self, Route::Login)
    }
}

/// Outcome of looking up a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    View(Route),
    Redirect(&'static str),
    NotFound,
}

pub fn resolve(path: &str) -> Resolved {
    let path = path.trim();
    if path == "/" {
        return Resolved::Redirect(LOGIN_PATH);
    }
    ROUTES
        .iter()
        .find(|(candidate, _)| *candidate == path)
        .map(|(_, route)| Resolved::View(*route))
        .unwrap_or(Resolved::NotFound)
}

/// An entry of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Link(Route),
    Logout,
}

impl NavItem {
    pub fn label(self) -> &'static str {
        match self {
            NavItem::Link(route) => route.label(),
            NavItem::Logout => "Logout",
        }
    }
}

/// Logged out: only Login. Logged in: the six pages plus Logout.
pub fn nav_items(authenticated: bool) -> Vec<NavItem> {
    if !authenticated {
        return vec![NavItem::Link(Route::Login)];
    }
    ROUTES
        .iter()
        .filter(|(_, route)| route.is_gated())
        .map(|(_, route)| NavItem::Link(*route))
        .chain(std::iter::once(NavItem::Logout))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_table() {
        assert_eq!(resolve("/login"), Resolved::View(Route::Login));
        assert_eq!(resolve("/crc"), Resolved::View(Route::ChangeReferralCode));
        assert_eq!(resolve("/sendNoti"), Resolved::View(Route::SendNotification));
        assert_eq!(resolve("/referrer_stats"), Resolved::View(Route::ReferrerStats));
        assert_eq!(resolve("/"), Resolved::Redirect(LOGIN_PATH));
        assert_eq!(resolve("/sendnoti"), Resolved::NotFound);
    }

    #[test]
    fn test_paths_round_trip() {
        for (path, route) in ROUTES {
            assert_eq!(route.path(), *path);
            assert_eq!(resolve(path), Resolved::View(*route));
        }
    }

    #[test]
    fn test_nav_items_follow_auth() {
        assert_eq!(nav_items(false), vec![NavItem::Link(Route::Login)]);

        let items = nav_items(true);
        assert_eq!(items.len(), 7);
        assert_eq!(items[0], NavItem::Link(Route::UserReferrals));
        assert_eq!(items[6], NavItem::Logout);
        assert!(!items.contains(&NavItem::Link(Route::Login)));
    }

    #[test]
    fn test_only_login_is_public() {
        assert!(!Route::Login.is_gated());
        assert!(Route::UserData.is_gated());
        assert!(Route::QuizForm.is_gated());
    }
}
