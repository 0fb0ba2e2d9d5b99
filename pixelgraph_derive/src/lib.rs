//! Proc-macros shared across the pixelgraph workspace.
//!
//! - `#[context(...)]` wraps a fallible function body so any error returned
//!   picks up an `anyhow` context message, the way hand-written
//!   `.map_err(|e| e.context(...))` chains would, without the boilerplate.
//! - `#[derive(ParamBind)]` generates a `set_param(key, value)` method that
//!   binds a single named configuration string onto a struct field via
//!   `FromStr`. This is the concrete shape of the "default converter"
//!   collaborator in the parameter injection design: operators that don't
//!   need custom parsing just derive it.

mod args;

use args::Args;
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::{ToTokens, quote};
use syn::{Data, Fields, parse_macro_input, spanned::Spanned};

#[proc_macro_attribute]
pub fn context(args: TokenStream, input: TokenStream) -> TokenStream {
	let Args(move_token, format_args) = parse_macro_input!(args);
	let mut input = parse_macro_input!(input as syn::ItemFn);

	let body = &input.block;
	let return_type = &input.sig.output;
	let err = Ident::new("err", Span::mixed_site());

	let new_body = if input.sig.asyncness.is_some() {
		let return_type = match return_type {
			syn::ReturnType::Default => {
				return syn::Error::new_spanned(input, "function should return Result")
					.to_compile_error()
					.into();
			}
			syn::ReturnType::Type(_, return_type) => return_type,
		};
		let result = Ident::new("result", Span::mixed_site());
		quote! {
			let #result: #return_type = async #move_token { #body }.await;
			#result.map_err(|#err| #err.context(format!(#format_args)).into())
		}
	} else {
		let force_fn_once = Ident::new("force_fn_once", Span::mixed_site());
		quote! {
			let #force_fn_once = ::core::iter::empty::<()>();
			(#move_token || #return_type {
				::core::mem::drop(#force_fn_once);
				#body
			})().map_err(|#err| #err.context(format!(#format_args)).into())
		}
	};
	input.block.stmts = vec![syn::Stmt::Expr(syn::Expr::Verbatim(new_body), None)];

	input.into_token_stream().into()
}

#[proc_macro_derive(ParamBind)]
pub fn derive_param_bind(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as syn::DeriveInput);
	let name = &input.ident;

	let data = match &input.data {
		Data::Struct(data_struct) => data_struct,
		_ => {
			return syn::Error::new(input.ident.span(), "ParamBind can only be derived for structs")
				.to_compile_error()
				.into();
		}
	};

	let fields = match &data.fields {
		Fields::Named(named) => &named.named,
		_ => {
			return syn::Error::new(data.fields.span(), "ParamBind requires named fields")
				.to_compile_error()
				.into();
		}
	};

	let arms = fields.iter().map(|field| {
		let ident = field.ident.as_ref().expect("named field");
		let key = ident.to_string();
		quote! {
			#key => {
				self.#ident = ::std::str::FromStr::from_str(value)
					.map_err(|_| ::anyhow::anyhow!("cannot parse parameter '{}' from value '{}'", #key, value))?;
			}
		}
	});

	let expanded = quote! {
		impl #name {
			/// Binds a single named configuration value onto this parameter struct.
			///
			/// Returns an error for unknown keys or values that fail to parse,
			/// which the caller wraps as `ParameterInjectionFailed`.
			pub fn set_param(&mut self, key: &str, value: &str) -> ::anyhow::Result<()> {
				match key {
					#(#arms)*
					other => ::anyhow::bail!("unknown parameter '{other}'"),
				}
				Ok(())
			}
		}
	};

	expanded.into()
}
