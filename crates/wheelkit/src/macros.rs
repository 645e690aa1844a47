#[macro_export]
macro_rules! impl_text_newtype {
    ($name:ty) => {
        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Missing attributes render as empty text.
            pub fn or_empty(value: Option<Self>) -> Self {
                value.unwrap_or_else(|| Self::new(String::new()))
            }
        }
    };
}
