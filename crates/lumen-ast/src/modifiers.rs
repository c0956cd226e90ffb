/// Declared visibility of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,
    /// Visible within the compilation, not exported.
    #[default]
    Internal,
    Private,
}

impl Visibility {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Private => "private",
        }
    }
}

/// The modifier set attached to a declaration.
///
/// Built completely before the symbol that carries it; symbols never see
/// a partially-filled modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_open: bool,
    pub is_abstract: bool,
    pub is_override: bool,
    pub is_infix: bool,
}

impl Modifiers {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visibility: Visibility::Internal,
            is_static: false,
            is_open: false,
            is_abstract: false,
            is_override: false,
            is_infix: false,
        }
    }

    #[must_use]
    pub const fn public() -> Self {
        Self::new().with_visibility(Visibility::Public)
    }

    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub const fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub const fn with_open(mut self) -> Self {
        self.is_open = true;
        self
    }

    #[must_use]
    pub const fn with_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    #[must_use]
    pub const fn with_override(mut self) -> Self {
        self.is_override = true;
        self
    }

    #[must_use]
    pub const fn with_infix(mut self) -> Self {
        self.is_infix = true;
        self
    }
}
