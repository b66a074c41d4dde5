pub struct Step {
    pub title: &'static str,
    pub description: &'static str,
}

pub struct Reason {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub company: &'static str,
    pub review: &'static str,
}

pub const BRAND: &str = "SoftSell";
pub const TAGLINE: &str =
    "Your trusted partner for reselling unused software licenses with ease and security.";
pub const CALL_TO_ACTION: &str = "Get a Quote";

pub const STEPS: [Step; 3] = [
    Step {
        title: "Upload License",
        description: "Simply upload your software license to our platform.",
    },
    Step {
        title: "Get Valuation",
        description: "Receive a fair valuation based on current market trends.",
    },
    Step {
        title: "Get Paid",
        description: "Once approved, get paid quickly and securely.",
    },
];

pub const REASONS: [Reason; 4] = [
    Reason {
        icon: "🌟",
        title: "Trusted Expertise",
        description: "Our team has years of experience in software resale, ensuring you get the best value for your licenses.",
    },
    Reason {
        icon: "💰",
        title: "Competitive Pricing",
        description: "We offer the most competitive prices in the market, maximizing your returns on software licenses.",
    },
    Reason {
        icon: "🔒",
        title: "Secure Transactions",
        description: "Your data and transactions are safe with us, thanks to our robust security measures.",
    },
    Reason {
        icon: "📞",
        title: "24/7 Support",
        description: "Our dedicated support team is available around the clock to assist you with any inquiries.",
    },
];

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        name: "Sachin Joshi",
        role: "Software Engineer",
        company: "Tech Innovations",
        review: "SoftSell made the process of selling my software licenses incredibly easy. Highly recommend!",
    },
    Testimonial {
        name: "Virat Sharma",
        role: "Product Manager",
        company: "Creative Solutions",
        review: "Fair valuation and fast payment. SoftSell is a game changer in the software resale market!",
    },
    Testimonial {
        name: "Mohit Singh",
        role: "CTO",
        company: "Future Tech",
        review: "SoftSell's platform is intuitive and efficient. I was able to sell my licenses in no time!",
    },
];
