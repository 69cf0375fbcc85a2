//! Introspect derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident};

use crate::parse::{parse_introspect, IntrospectArgs, IntrospectFieldArgs};

/// Generate the HostType and Introspect implementations
pub fn derive_introspect(input: DeriveInput) -> TokenStream {
    match parse_introspect(&input) {
        Ok(args) => generate_impl(args),
        Err(e) => e.write_errors(),
    }
}

fn generate_impl(args: IntrospectArgs) -> TokenStream {
    let struct_name = &args.ident;
    let class_name = args.class_name();

    if !args.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &args.generics,
            "Introspect cannot be derived for generic structs",
        )
        .to_compile_error();
    }

    let fields = match &args.data {
        darling::ast::Data::Struct(fields) => &fields.fields,
        _ => {
            return syn::Error::new_spanned(
                &args.ident,
                "Introspect can only be derived for structs",
            )
            .to_compile_error()
        }
    };

    let field_decls: Vec<_> = fields
        .iter()
        .filter(|f| !f.skip)
        .filter_map(|f| generate_field(&class_name, f))
        .collect();

    let constructor = if args.default_constructor {
        quote! {
            .constructor(
                ::propmeta_core::types::ConstructorDescriptor::no_args().with_handle(
                    ::propmeta_core::types::ConstructorHandle::new(|_| {
                        Ok(::std::boxed::Box::new(<Self as ::std::default::Default>::default())
                            as ::std::boxed::Box<dyn ::std::any::Any + ::std::marker::Send>)
                    }),
                ),
            )
        }
    } else {
        quote! {}
    };

    let value_impls = if args.value {
        generate_value_impls(struct_name, &class_name)
    } else {
        quote! {}
    };

    quote! {
        impl ::propmeta_core::types::HostType for #struct_name {
            fn descriptor() -> ::propmeta_core::types::TypeDescriptor {
                ::propmeta_core::types::TypeDescriptor::class(#class_name)
            }
        }

        impl ::propmeta_core::types::Introspect for #struct_name {
            fn declare() -> ::propmeta_core::types::ClassDecl {
                ::propmeta_core::types::ClassDecl::class(#class_name)
                    #(.field(#field_decls))*
                    #constructor
            }
        }

        #value_impls
    }
}

/// Field descriptor with handles that downcast the target to `Self`
fn generate_field(class_name: &str, field: &IntrospectFieldArgs) -> Option<TokenStream> {
    let ident = field.ident.as_ref()?;
    let declared_name = field.declared_name()?;
    let ty = &field.ty;

    let getter = quote! {
        |target: &dyn ::std::any::Any| {
            let this = target
                .downcast_ref::<Self>()
                .ok_or_else(|| ::propmeta_core::types::InvokeError::target_mismatch(#class_name))?;
            Ok(::propmeta_core::types::Value::from(
                ::std::clone::Clone::clone(&this.#ident),
            ))
        }
    };

    let (modifiers, handle) = if field.constant {
        (
            quote! {
                ::propmeta_core::types::Modifiers::PUBLIC
                    | ::propmeta_core::types::Modifiers::STATIC
                    | ::propmeta_core::types::Modifiers::FINAL
            },
            quote! { ::propmeta_core::types::FieldHandle::read_only(#getter) },
        )
    } else {
        let setter = quote! {
            |target: &mut dyn ::std::any::Any, value: ::propmeta_core::types::Value| {
                let this = target
                    .downcast_mut::<Self>()
                    .ok_or_else(|| ::propmeta_core::types::InvokeError::target_mismatch(#class_name))?;
                this.#ident = <#ty as ::propmeta_core::types::FromValue>::from_value(value)?;
                Ok(())
            }
        };
        (
            quote! { ::propmeta_core::types::Modifiers::PRIVATE },
            quote! { ::propmeta_core::types::FieldHandle::new(#getter, #setter) },
        )
    };

    Some(quote! {
        ::propmeta_core::types::FieldDescriptor::new(
            #declared_name,
            <#ty as ::propmeta_core::types::HostType>::descriptor(),
        )
        .with_modifiers(#modifiers)
        .with_handle(#handle)
    })
}

fn generate_value_impls(struct_name: &Ident, class_name: &str) -> TokenStream {
    quote! {
        impl ::std::convert::From<#struct_name> for ::propmeta_core::types::Value {
            fn from(value: #struct_name) -> Self {
                ::propmeta_core::types::Value::object(value)
            }
        }

        impl ::propmeta_core::types::FromValue for #struct_name {
            fn from_value(
                value: ::propmeta_core::types::Value,
            ) -> ::std::result::Result<Self, ::propmeta_core::types::InvokeError> {
                value
                    .downcast_ref::<#struct_name>()
                    .cloned()
                    .ok_or_else(|| ::propmeta_core::types::InvokeError::ArgumentType {
                        expected: #class_name,
                        found: value.kind(),
                    })
            }
        }
    }
}
