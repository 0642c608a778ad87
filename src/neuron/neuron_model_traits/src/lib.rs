use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};


/// Derive macro to implement the accessor traits required by `IterateAndSpike`,
/// including `CurrentVoltage`, `Timestep`, and `IsSpiking`, the struct must have
/// the fields `current_voltage: f64`, `dt: f64`, and `is_spiking: bool`
#[proc_macro_derive(NeuronModelBase)]
pub fn derive_neuron_model_traits(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let input = parse_macro_input!(input as DeriveInput);

    // Get the name of the struct we are deriving the trait for
    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics crate::neuron::CurrentVoltage for #name #ty_generics #where_clause {
            fn get_current_voltage(&self) -> f64 {
                self.current_voltage
            }
        }

        impl #impl_generics crate::neuron::Timestep for #name #ty_generics #where_clause {
            fn get_dt(&self) -> f64 {
                self.dt
            }

            fn set_dt(&mut self, dt: f64) {
                self.dt = dt;
            }
        }

        impl #impl_generics crate::neuron::IsSpiking for #name #ty_generics #where_clause {
            fn is_spiking(&self) -> bool {
                self.is_spiking
            }
        }
    };

    TokenStream::from(expanded)
}
