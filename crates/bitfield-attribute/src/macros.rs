//! Compile-time shape declarations with one typed accessor per bit.

/// Declares a shape and a view type with a getter and a setter for every bit.
///
/// ```
/// use std::collections::HashMap;
///
/// bitfield_attribute::bit_field! {
///     /// Notification settings stored in the `settings` column.
///     pub struct Settings: 16 {
///         email,
///         sms,
///         push,
///     }
/// }
///
/// let mut record = HashMap::from([("settings".to_string(), 0b101_i64)]);
/// let mut settings = Settings::new(&mut record, "settings").unwrap();
///
/// assert!(settings.email());
/// assert!(!settings.is_sms());
///
/// settings.set_sms(true);
/// assert_eq!(settings.value(), 0b111);
/// ```
///
/// The width defaults to [crate::shape::DEFAULT_WIDTH]. Repeating a name, or declaring more
/// names than the width holds, fails to compile:
///
/// ```compile_fail
/// bitfield_attribute::bit_field! {
///     struct Repeated { first, first }
/// }
/// ```
///
/// ```compile_fail
/// bitfield_attribute::bit_field! {
///     struct Narrow: 2 { a, b, c }
/// }
/// ```
///
/// The generated type dereferences to [crate::bit_field::BitField], so bulk updates and
/// snapshots are available on it too.
#[macro_export]
macro_rules! bit_field {
    (@width) => {
        $crate::shape::DEFAULT_WIDTH
    };
    (@width $width:literal) => {
        $width
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(: $width:literal)? {
            $($bit:ident),* $(,)?
        }
    ) => {
        $crate::__private::paste! {
            // Variant discriminants are the bit positions; a repeated name is a duplicate variant.
            #[doc(hidden)]
            #[allow(non_camel_case_types, dead_code)]
            $vis enum [<$name Bit>] {
                $($bit),*
            }

            const _: () = {
                let width: u32 = $crate::bit_field!(@width $($width)?);
                let names: &[&str] = &[$(stringify!($bit)),*];
                assert!(
                    width >= 1 && width <= $crate::shape::MAX_WIDTH,
                    "invalid integer width"
                );
                assert!(
                    names.len() <= width as usize,
                    "too many bit names for the integer width"
                );
            };

            $(#[$meta])*
            $vis struct $name<'a, H: $crate::host::Host + ?Sized> {
                inner: $crate::bit_field::BitField<'a, H>,
            }

            impl<'a, H: $crate::host::Host + ?Sized> $name<'a, H> {
                /// Bit names, in bit order.
                pub const NAMES: &'static [&'static str] = &[$(stringify!($bit)),*];

                pub const WIDTH: u32 = $crate::bit_field!(@width $($width)?);

                /// The shared shape of every view of this type.
                pub fn shape() -> &'static $crate::shape::Shape {
                    static SHAPE: ::std::sync::OnceLock<$crate::shape::Shape> =
                        ::std::sync::OnceLock::new();

                    SHAPE.get_or_init(|| {
                        $crate::shape::Shape::with_width(Self::NAMES.iter().copied(), Self::WIDTH)
                            .expect("bit names are checked at compile time")
                    })
                }

                /// Binds the view to `field` of `host` and decodes its current value.
                pub fn new(
                    host: &'a mut H,
                    field: &'a str,
                ) -> ::std::result::Result<Self, $crate::errors::ViewError> {
                    Ok(Self {
                        inner: $crate::bit_field::BitField::new(Self::shape(), host, field)?,
                    })
                }

                pub fn into_inner(self) -> $crate::bit_field::BitField<'a, H> {
                    self.inner
                }

                $(
                    #[doc = concat!("Whether `", stringify!($bit), "` is set.")]
                    pub fn $bit(&self) -> bool {
                        self.inner.is_set_at([<$name Bit>]::$bit as usize)
                    }

                    #[doc = concat!("Alias of `", stringify!($bit), "`.")]
                    pub fn [<is_ $bit>](&self) -> bool {
                        self.$bit()
                    }

                    #[doc = concat!("Sets `", stringify!($bit), "` and writes the field back to the host.")]
                    pub fn [<set_ $bit>](&mut self, value: bool) {
                        self.inner.set_at([<$name Bit>]::$bit as usize, value)
                    }
                )*
            }

            impl<'a, H: $crate::host::Host + ?Sized> ::std::ops::Deref for $name<'a, H> {
                type Target = $crate::bit_field::BitField<'a, H>;

                fn deref(&self) -> &Self::Target {
                    &self.inner
                }
            }

            impl<'a, H: $crate::host::Host + ?Sized> ::std::ops::DerefMut for $name<'a, H> {
                fn deref_mut(&mut self) -> &mut Self::Target {
                    &mut self.inner
                }
            }

            impl<H: $crate::host::Host + ?Sized> ::std::fmt::Debug for $name<'_, H> {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.debug_tuple(stringify!($name)).field(&self.inner).finish()
                }
            }
        }
    };
}
