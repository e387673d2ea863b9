//! Declaration macros for families and variants.

/// Declares a family: its trait, its static registry, and the glue that makes
/// `Box<dyn Trait>` clonable, comparable and (de)serializable.
///
/// ```ignore
/// family! {
///     /// Rich text spans.
///     pub trait RichTextObject: "rich_text" in RICH_TEXT {
///         fn plain_text(&self) -> &str;
///     }
/// }
/// ```
///
/// Deserializing a `Box<dyn Trait>` (directly or as a nested field) resolves
/// the concrete variant through the family registry.
#[macro_export]
macro_rules! family {
	(
		$(#[$meta:meta])*
		$vis:vis trait $name:ident: $label:literal in $family:ident {
			$($body:tt)*
		}
	) => {
		$crate::__private::paste::paste! {
			#[doc = concat!("Clone support for `Box<dyn ", stringify!($name), ">`.")]
			$vis trait [<$name Clone>] {
				fn clone_boxed(&self) -> ::std::boxed::Box<dyn $name>;
			}

			impl<V: $name + ::std::clone::Clone> [<$name Clone>] for V {
				fn clone_boxed(&self) -> ::std::boxed::Box<dyn $name> {
					::std::boxed::Box::new(self.clone())
				}
			}

			$(#[$meta])*
			$vis trait $name: $crate::DynObject + [<$name Clone>] {
				$($body)*
			}
		}

		#[doc = concat!("Registry of `", $label, "` variants.")]
		$vis static $family: $crate::Family<dyn $name> = $crate::Family::new($label);

		impl $crate::FamilyKind for dyn $name {
			const LABEL: &'static str = $label;

			fn family() -> &'static $crate::Family<Self> {
				&$family
			}
		}

		impl dyn $name {
			/// Returns the concrete variant, if it is a `V`.
			pub fn downcast_ref<V: 'static>(&self) -> ::std::option::Option<&V> {
				$crate::DynObject::as_any(self).downcast_ref::<V>()
			}

			/// Returns the concrete variant mutably, if it is a `V`.
			pub fn downcast_mut<V: 'static>(&mut self) -> ::std::option::Option<&mut V> {
				$crate::DynObject::as_any_mut(self).downcast_mut::<V>()
			}

			/// Returns true if the concrete variant is a `V`.
			pub fn is<V: 'static>(&self) -> bool {
				$crate::DynObject::as_any(self).is::<V>()
			}
		}

		impl ::std::clone::Clone for ::std::boxed::Box<dyn $name> {
			fn clone(&self) -> Self {
				(**self).clone_boxed()
			}
		}

		impl ::std::cmp::PartialEq for dyn $name {
			fn eq(&self, other: &Self) -> bool {
				$crate::DynObject::object_eq(self, $crate::DynObject::as_any(other))
			}
		}

		// Lets derived `PartialEq` compare `Box<dyn _>` fields (rust-lang/rust#31740).
		impl ::std::cmp::PartialEq<&::std::boxed::Box<dyn $name>> for ::std::boxed::Box<dyn $name> {
			fn eq(&self, other: &&::std::boxed::Box<dyn $name>) -> bool {
				$crate::DynObject::object_eq(&**self, $crate::DynObject::as_any(&***other))
			}
		}

		impl $crate::__private::serde::Serialize for dyn $name {
			fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
			where
				S: $crate::__private::serde::Serializer,
			{
				let value = $crate::DynObject::native_value(self)
					.map_err(<S::Error as $crate::__private::serde::ser::Error>::custom)?;
				$crate::__private::serde::Serialize::serialize(&value, serializer)
			}
		}

		impl<'de> $crate::__private::serde::Deserialize<'de> for ::std::boxed::Box<dyn $name> {
			fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
			where
				D: $crate::__private::serde::Deserializer<'de>,
			{
				let raw = <$crate::__private::serde_json::Value as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
				$family
					.deserialize(raw)
					.map_err($crate::__private::nested_error::<D::Error>)
			}
		}
	};
}

/// Registers a concrete type as a variant of a family.
///
/// The type must implement [`crate::Variant`] with a `TAG`, and the family
/// trait. Registration is static: the family picks it up on first use.
///
/// ```ignore
/// variant!(RichTextObject => TextSpan);
/// ```
#[macro_export]
macro_rules! variant {
	(@one $family:ident => $ty:ident) => {
		$crate::__private::paste::paste! {
			#[doc(hidden)]
			#[allow(non_upper_case_globals)]
			static [<__VARIANT_ $family _ $ty>]: $crate::VariantDef<dyn $family> = $crate::VariantDef {
				tag: $crate::variant_tag::<$ty>(),
				type_name: ::std::stringify!($ty),
				type_id: ::std::any::TypeId::of::<$ty>,
				build: |raw| {
					$crate::build_strict::<$ty>(raw)
						.map(|v| ::std::boxed::Box::new(v) as ::std::boxed::Box<dyn $family>)
				},
				compose: |params| {
					$crate::compose_params::<$ty>(params)
						.map(|v| ::std::boxed::Box::new(v) as ::std::boxed::Box<dyn $family>)
				},
			};

			$crate::__private::inventory::submit! {
				$crate::VariantReg {
					family: <dyn $family as $crate::FamilyKind>::LABEL,
					def: &[<__VARIANT_ $family _ $ty>],
				}
			}
		}
	};
	($family:ident => $($ty:ident),+ $(,)?) => {
		$( $crate::variant!(@one $family => $ty); )+
	};
}
