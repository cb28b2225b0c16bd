//! The default Orixá funnel shipped with the app.

use async_trait::async_trait;
use quiz_core::model::{
    IdError, OptionId, QuizOption, StepCatalog, StepDefinition, StepId, StepKind,
};

use crate::repository::{CatalogSource, ContentError};

/// Checkout destination used when none is configured.
pub const DEFAULT_CHECKOUT_URL: &str = "https://pay.hotmart.com/example";

fn options(pairs: &[(&str, &str)]) -> Result<Vec<QuizOption>, IdError> {
    pairs
        .iter()
        .map(|(id, label)| Ok(QuizOption::new(OptionId::new(*id)?, *label)))
        .collect()
}

/// Build the 13-step default catalog.
///
/// # Errors
///
/// Only fails if the embedded content is edited into an invalid shape.
pub fn default_catalog() -> Result<StepCatalog, quiz_core::Error> {
    let steps = vec![
        StepDefinition::new(StepId::new(1), StepKind::Intro)
            .with_title("✨ Vamos revelar o que está por trás dos seus caminhos fechados ✨")
            .with_text(
                "Axé, meu filho. Axé, minha filha. 🙏\nEste não é um teste comum.\n\n\
                 Aqui, vamos olhar para os sinais da sua vida, para entender se existe um \
                 desalinhamento espiritual que pode estar bloqueando sua prosperidade, seus \
                 relacionamentos e sua paz.\n\nResponda com sinceridade.\nOs Orixás falam \
                 através da verdade.",
            )
            .with_button_label("👉 Começar agora"),
        StepDefinition::question(
            StepId::new(2),
            "Você sente que sua vida parece andar em círculos, mesmo se esforçando?",
            options(&[
                ("circles", "🔁 Sim, os mesmos problemas sempre voltam"),
                ("trapped", "⚠️ Às vezes melhora, mas logo trava de novo"),
                ("hard", "😔 Me esforço muito e quase nunca dá certo"),
                ("flows", "🌱 Não, minha vida flui bem"),
            ])?,
        ),
        StepDefinition::question(
            StepId::new(3),
            "Em qual dessas áreas você sente que algo não flui como deveria?",
            options(&[
                ("money", "💰 Dinheiro e prosperidade"),
                ("love", "❤️ Relacionamentos amorosos"),
                ("peace", "🧠 Paz interior / ansiedade"),
                ("protection", "🛡️ Proteção espiritual"),
                ("everything", "🔄 Tudo parece travado ao mesmo tempo"),
            ])?,
        )
        .allowing_multiple(Some(2))
        .with_button_label("Continuar jornada"),
        StepDefinition::new(StepId::new(4), StepKind::Transition)
            .with_title("⚠️ Isso é importante você entender agora")
            .with_text(
                "Se você respondeu que sente bloqueios ou repetições… a culpa não é sua.\n\n\
                 Na maioria dos casos, não é falta de fé. Não é azar. E nem castigo.\n\n\
                 Muitas pessoas vivem desalinhadas espiritualmente, sem saber quem as rege, \
                 e acabam pedindo ajuda para a força errada… ou nenhuma.\n\n\
                 👉 Respira. Vamos continuar.",
            )
            .with_button_label("➡️ Seguir"),
        StepDefinition::question(
            StepId::new(5),
            "Você sabia que, dentro da tradição dos Orixás, cada pessoa nasce sob a regência \
             de uma força espiritual específica?",
            options(&[
                ("no", "😮 Não sabia disso"),
                ("heard", "🤔 Já ouvi falar, mas nunca entendi direito"),
                ("yes", "🧿 Sim, acredito muito nisso"),
                ("doubt", "⚠️ Tenho dúvidas, mas estou aberto(a)"),
            ])?,
        ),
        StepDefinition::question(
            StepId::new(6),
            "Você sente que, mesmo acreditando em Deus ou nos Orixás, algo parece fora do \
             lugar na sua vida?",
            options(&[
                ("out_of_place", "⚠️ Sim, sinto que estou desalinhado(a)"),
                ("maybe", "🤔 Às vezes, não sei explicar"),
                ("alone", "😔 Sinto que estou sozinho(a) espiritualmente"),
                ("aligned", "🌿 Não, me sinto totalmente alinhado(a)"),
            ])?,
        ),
        StepDefinition::question(
            StepId::new(7),
            "Quando você faz uma oração ou pedido, você sente que é ouvido(a)?",
            options(&[
                ("sometimes", "🙏 Às vezes sim, às vezes não"),
                ("rarely", "😞 Quase nunca vejo resultado"),
                ("nothing", "🔄 Parece que sempre peço, mas nada muda"),
                ("always", "🌟 Sim, sempre sinto resposta"),
            ])?,
        ),
        StepDefinition::new(StepId::new(8), StepKind::Transition)
            .with_title("🕯️ Isso não é coincidência")
            .with_text(
                "Dentro das tradições espirituais mais antigas, existe uma lei clara:\n\n\
                 👉 Cada pessoa nasce sob a regência de um Orixá específico.\n\n\
                 Essa força não muda. Não se escolhe. Ela vem com você desde o nascimento.\n\n\
                 Quando você não sabe quem te rege, vive tentando se conectar… mas nunca \
                 chega na fonte certa.",
            )
            .with_button_label("➡️ Continuar"),
        StepDefinition::question(
            StepId::new(9),
            "Você sabia que a sua data de nascimento carrega o padrão espiritual do seu Orixá?",
            options(&[
                ("clueless", "😮 Não fazia ideia"),
                ("explains", "🤯 Isso explica muita coisa…"),
                ("heard_of", "🧿 Já ouvi falar, mas nunca confirmei"),
                ("suspected", "⚠️ Sempre desconfiei disso"),
            ])?,
        ),
        StepDefinition::new(StepId::new(10), StepKind::DateInput)
            .with_question("Para seguir com a leitura espiritual, informe sua data de nascimento:")
            .with_subtitle(
                "Essa informação não é usada para cálculos comuns. Ela é a base do padrão \
                 espiritual que te rege desde o nascimento.",
            )
            .with_button_label("Consultar Padrão Espiritual"),
        StepDefinition::new(StepId::new(11), StepKind::LoadingAnalysis)
            .with_title("🔮 Analisando seu padrão espiritual...")
            .with_text(
                "Com base na sua data de nascimento, o seu padrão espiritual está sendo \
                 identificado.\n\nOs sinais apontam para uma regência clara. Mas existe um \
                 detalhe importante…\n\n👉 Nem toda revelação pode ser feita sem o ritual correto.",
            ),
        StepDefinition::new(StepId::new(12), StepKind::Transition)
            .with_title("🧿 Sobre quem faz essa leitura")
            .with_text(
                "Essa análise segue os fundamentos do jogo de búzios, utilizado há séculos \
                 dentro do Candomblé.\n\nO processo é guiado por um Babalorixá com mais de 30 \
                 anos de estrada, respeitando a tradição, o axé e a lei da troca espiritual.\n\n\
                 Isso não é teste automático. É um caminho sério.",
            )
            .with_button_label("➡️ Ver diagnóstico preliminar"),
        StepDefinition::new(StepId::new(13), StepKind::PreRevelation)
            .with_title("✨ Seu Orixá já foi identificado ✨")
            .with_text(
                "De acordo com o seu padrão espiritual, existe um Orixá específico que rege a \
                 sua vida.\n\nEssa força explica por que alguns caminhos travam, por que certas \
                 áreas não fluem e onde está a chave da sua prosperidade.\n\n⚠️ Mas a revelação \
                 do nome do seu Orixá e do ponto de conexão só pode ser feita após a conclusão \
                 do ritual espiritual.",
            )
            .with_button_label("Quero fazer o ritual"),
    ];

    Ok(StepCatalog::new(steps)?)
}

/// Catalog source backed by `default_catalog`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

#[async_trait]
impl CatalogSource for BuiltinCatalog {
    async fn load_catalog(&self) -> Result<StepCatalog, ContentError> {
        Ok(default_catalog()?)
    }

    fn describe(&self) -> String {
        "built-in funnel".to_string()
    }
}
