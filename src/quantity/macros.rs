macro_rules! quantity {
    ($(#[$attr:meta])* $name:ident, suffix: $suffix:literal) => {
        $(#[$attr])*
        #[repr(transparent)]
        #[derive(
            ::derive_more::Add,
            ::derive_more::AddAssign,
            ::derive_more::From,
            ::derive_more::FromStr,
            ::derive_more::Sub,
            ::derive_more::Sum,
            ::serde::Deserialize,
            ::serde::Serialize,
            ::std::clone::Clone,
            ::std::marker::Copy,
        )]
        pub struct $name(pub f64);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, formatter)?;
                write!(formatter, " {}", $suffix)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(&self.0, formatter)?;
                write!(formatter, "{}", $suffix)
            }
        }

        impl ::std::ops::Neg for $name {
            type Output = Self;

            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl ::std::ops::Div<f64> for $name {
            type Output = Self;

            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $name {
            pub const ZERO: Self = Self(0.0);
        }

        impl ::std::cmp::PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<::std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl ::std::cmp::Ord for $name {
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                ::ordered_float::OrderedFloat(self.0).cmp(&::ordered_float::OrderedFloat(other.0))
            }
        }

        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                ::ordered_float::OrderedFloat(self.0).eq(&::ordered_float::OrderedFloat(other.0))
            }
        }

        impl ::std::cmp::Eq for $name {}
    };
}
