use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, FnArg, Ident, ItemFn, Pat, Signature, Type};

/// Transform an asynchronous test into a synchronous one, running it against a
/// freshly built server with an empty ledger.
///
/// Injectable dependencies are [`rocket::local::asynchronous::Client`] and
/// `crate::model::Ledger` (the same ledger the client's server uses).
///
/// `#[backend_test(admin)]` and `#[backend_test(voter)]` open a session for
/// the example administrator or example voter before the test starts.
#[proc_macro_attribute]
pub fn backend_test(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_fn = parse_macro_input!(input as ItemFn);

    // Extract the injected arguments and reject invalid function signatures.
    let test_args = match check_sig(item_fn.sig.clone()) {
        Ok(args) => args,
        Err(err) => {
            return err.into_compile_error().into();
        }
    };

    // Rename the future so the test can have its original name.
    let name = item_fn.sig.ident.clone();
    let new_name = format_ident!("{}_fut", name);
    item_fn.sig.ident = new_name.clone();

    // Log in the client as admin/voter if needed.
    let maybe_login = match parse_macro_input!(args as Option<Ident>) {
        Some(arg) if arg == "admin" => login(quote! {
            crate::model::api::auth::SessionRequest::example_admin()
        }),
        Some(arg) if arg == "voter" => login(quote! {
            crate::model::api::auth::SessionRequest::example_voter()
        }),
        Some(arg) => {
            return syn::Error::new(arg.span(), "Expected `admin` or `voter`")
                .into_compile_error()
                .into();
        }
        None => TokenStream2::new(),
    };

    // Rewrite the test function.
    quote! {
        #[test]
        #[allow(unused_variables)]
        fn #name() {
            /// Test setup.
            async fn setup() -> (rocket::local::asynchronous::Client, crate::model::Ledger) {
                // This test enters backend code, so enable logging.
                log4rs_test_utils::test_logging::init_logging_once_for(
                    ["campus_ledger"],
                    None,
                    None,
                );

                let config = crate::config::Config::example();
                let ledger = config.new_ledger();
                let rocket_client = rocket::local::asynchronous::Client::tracked(
                    crate::rocket_for(config, ledger.clone()),
                )
                .await
                .unwrap();

                #maybe_login

                (rocket_client, ledger)
            }

            /// The test itself.
            #item_fn

            let runtime = rocket::tokio::runtime::Builder::new_multi_thread()
                .thread_name("rocket-worker-test-thread")
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();

            let (rocket_client, ledger) = runtime.block_on(setup());
            runtime.block_on(#new_name(#(#test_args),*));
        }
    }
    .into()
}

/// Open a session for the given `SessionRequest` expression. The response is
/// scoped to its own block so the client can be moved out of `setup()`.
fn login(request: TokenStream2) -> TokenStream2 {
    quote! {{
        let response = rocket_client
            .post(uri!(crate::api::auth::open_session))
            .header(rocket::http::ContentType::JSON)
            .body(rocket::serde::json::json!(#request).to_string())
            .dispatch()
            .await;
        assert_eq!(rocket::http::Status::Ok, response.status());
    }}
}

/// Ensure the wrapped test is async, extract parameters to inject, and reject unknown parameters.
fn check_sig(sig: Signature) -> Result<Vec<TokenStream2>, syn::Error> {
    if sig.asyncness.is_none() {
        return Err(syn::Error::new(sig.span(), "Test must be marked `async`"));
    }

    let mut has_client = false;
    let mut has_ledger = false;
    let mut args = vec![];

    for input in &sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            if let (Pat::Ident(_), Type::Path(type_path)) = (&*pat_type.pat, &*pat_type.ty) {
                if let Some(type_ident) = type_path.path.get_ident() {
                    if type_ident == "Client" {
                        if has_client {
                            return Err(syn::Error::new(
                                input.span(),
                                "Test cannot accept more than one `rocket::local::asynchronous::Client`",
                            ));
                        }
                        has_client = true;
                        args.push(quote! { rocket_client });
                        continue;
                    } else if type_ident == "Ledger" {
                        if has_ledger {
                            return Err(syn::Error::new(
                                input.span(),
                                "Test cannot accept more than one `Ledger`",
                            ));
                        }
                        has_ledger = true;
                        args.push(quote! { ledger });
                        continue;
                    }
                }
            }
        }

        return Err(syn::Error::new(
            input.span(),
            "Expected one of `client_ident: Client` or `ledger_ident: Ledger`",
        ));
    }

    Ok(args)
}
