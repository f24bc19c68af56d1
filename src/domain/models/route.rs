/// Screens of the interactive client.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Route {
    Login,
    Signup,
    Search,
    Lists,
    Exit,
}

impl Route {
    pub fn requires_session(&self) -> bool {
        return matches!(self, Route::Search | Route::Lists);
    }
}
