use launchpad_contracts::launchpad::{LaunchpadFactory, CREATION_FEE};
use launchpad_contracts::token::{TestToken, TestTokenInitArgs};
use odra::casper_types::{U256, U512};
use odra::host::{HostEnv, HostRefLoader, NoArgs};
use odra::prelude::{Address, Addressable};
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Initial supply of the test token, 1 million tokens with 18 decimals
const TEST_TOKEN_SUPPLY: u128 = 1_000_000 * 1_000_000_000_000_000_000;

/// Deploys the launchpad factory and a test sale token
pub struct DeployLaunchpadScript;

impl DeployScript for DeployLaunchpadScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        let caller = env.caller();
        println!("Using address {:?}", caller);

        let balance = env.balance_of(&caller);
        println!("Wallet balance {} motes", balance);
        if balance < U512::from(CREATION_FEE) {
            println!("Not enough CSPR to pay the launchpad creation fee, skipping deployment");
            return Ok(());
        }

        println!("==> Deploying LaunchpadFactory");
        let factory = LaunchpadFactory::load_or_deploy(
            &env,
            NoArgs,
            container,
            500_000_000_000
        )?;
        println!("LaunchpadFactory deployed at: {:?}", factory.address());

        println!("==> Deploying TestToken");
        let token = TestToken::load_or_deploy(
            &env,
            TestTokenInitArgs {
                name: String::from("Test Token"),
                symbol: String::from("TST"),
                initial_supply: U256::from(TEST_TOKEN_SUPPLY),
            },
            container,
            300_000_000_000
        )?;
        println!("TestToken deployed at: {:?}", token.address());

        Ok(())
    }
}

/// Scenario to create a launchpad, paying the creation fee.
pub struct CreateLaunchpadScenario;

impl Scenario for CreateLaunchpadScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new("sale_token", "Address of the token being sold", NamedCLType::Key),
            CommandArg::new("beneficiary", "Owner of the new launchpad", NamedCLType::Key),
            CommandArg::new("total_amount", "Tokens subject to sale and vesting", NamedCLType::U256),
            CommandArg::new("sale_start", "Sale start (block time)", NamedCLType::U64),
            CommandArg::new("sale_end", "Sale end (block time)", NamedCLType::U64),
            CommandArg::new("vesting_start", "Vesting start (block time)", NamedCLType::U64),
            CommandArg::new("vesting_end", "Vesting end (block time)", NamedCLType::U64),
            CommandArg::new("ratio", "Token units per mote paid", NamedCLType::U256),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let factory = container.contract_ref::<LaunchpadFactory>(env)?;

        env.set_gas(50_000_000_000);
        let instance = factory
            .with_tokens(U512::from(CREATION_FEE))
            .try_create_launchpad(
                args.get_single::<Address>("sale_token")?,
                args.get_single::<Address>("beneficiary")?,
                args.get_single::<U256>("total_amount")?,
                args.get_single::<u64>("sale_start")?,
                args.get_single::<u64>("sale_end")?,
                args.get_single::<u64>("vesting_start")?,
                args.get_single::<u64>("vesting_end")?,
                args.get_single::<U256>("ratio")?,
            )?;

        println!("Launchpad created at: {:?}", instance);
        Ok(())
    }
}

impl ScenarioMetadata for CreateLaunchpadScenario {
    const NAME: &'static str = "create-launchpad";
    const DESCRIPTION: &'static str = "Creates a launchpad, attaching the 0.01 CSPR creation fee";
}

/// Scenario to approve the factory and deposit sale tokens into a
/// launchpad's escrow.
pub struct FundLaunchpadScenario;

impl Scenario for FundLaunchpadScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new("instance", "Address of the launchpad", NamedCLType::Key),
            CommandArg::new("amount", "Sale tokens to deposit", NamedCLType::U256),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut factory = container.contract_ref::<LaunchpadFactory>(env)?;
        let instance = args.get_single::<Address>("instance")?;
        let amount = args.get_single::<U256>("amount")?;

        let launchpad = factory.get_launchpad(instance);
        let Some(launchpad) = launchpad else {
            println!("No launchpad at {:?}", instance);
            return Ok(());
        };
        let mut token = TestToken::load(env, launchpad.sale_token);

        env.set_gas(10_000_000_000);
        token.try_approve(factory.address().clone(), amount)?;
        env.set_gas(20_000_000_000);
        factory.try_fund(instance, amount)?;

        println!(
            "Launchpad funded: {} of {} tokens",
            factory.funded(instance),
            launchpad.total_amount
        );
        Ok(())
    }
}

impl ScenarioMetadata for FundLaunchpadScenario {
    const NAME: &'static str = "fund-launchpad";
    const DESCRIPTION: &'static str = "Deposits sale tokens into a launchpad so its sale can open";
}

/// Scenario to withdraw collected fees to the factory owner.
pub struct WithdrawFeesScenario;

impl Scenario for WithdrawFeesScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let mut factory = container.contract_ref::<LaunchpadFactory>(env)?;

        env.set_gas(10_000_000_000);
        let amount = factory.try_withdraw()?;

        println!("Withdrew {} motes", amount);
        Ok(())
    }
}

impl ScenarioMetadata for WithdrawFeesScenario {
    const NAME: &'static str = "withdraw-fees";
    const DESCRIPTION: &'static str = "Withdraws collected creation fees to the factory owner";
}

pub fn main() {
    OdraCli::new()
        .about("CLI tool for the launchpad contracts")
        // Deploy scripts
        .deploy(DeployLaunchpadScript)
        // Contract references
        .contract::<LaunchpadFactory>()
        .contract::<TestToken>()
        // Scenarios
        .scenario(CreateLaunchpadScenario)
        .scenario(FundLaunchpadScenario)
        .scenario(WithdrawFeesScenario)
        .build()
        .run();
}
