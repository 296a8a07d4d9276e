use soroban_sdk::{contractclient, Address, Env};

/// The slice of the registry a pair reads at runtime.
#[allow(dead_code)]
#[contractclient(name = "FactoryClient")]
pub trait FactoryInterface {
    fn fee_to(env: Env) -> Option<Address>;
}
