//! Posts the site starts with

use super::Post;

/// The literal post list the store is seeded from
pub fn seed_posts() -> Vec<Post> {
    vec![
        Post::new(
            "2022-07-03",
            "You can actually mutate imports in Javascript",
            "mutable-imports",
            &["javascript"],
            "Do you know you can actually mutate an imported object in JS? Today, we will see how to mutate and avoid mutation for imported objects.",
        ),
        Post::new(
            "2023-07-03",
            "Exploring the world of functional programming in Javascript",
            "functional-programming-js",
            &["javascript", "functional programming"],
            "Let's delve into the functional programming paradigm in Javascript and discover its benefits and use cases.",
        ),
        Post::new(
            "2024-07-03",
            "Demystifying async/await in Javascript",
            "async-await-js",
            &["javascript", "async/await"],
            "Unravel the complexities of async/await in Javascript and grasp asynchronous programming with ease.",
        ),
        Post::new(
            "2022-08-03",
            "Optimizing React applications for performance",
            "react-performance-optimization",
            &["javascript", "react"],
            "Enhance the performance of your React applications by implementing effective optimization techniques.",
        ),
        Post::new(
            "2023-08-03",
            "Building a chatbot using Javascript libraries",
            "javascript-chatbot-libraries",
            &["javascript", "chatbot"],
            "Leverage Javascript libraries to streamline the development process of your next chatbot project.",
        ),
        Post::new(
            "2024-08-03",
            "Taming the complexity of state management in React",
            "react-state-management",
            &["javascript", "react"],
            "Explore various approaches to state management in React applications and choose the one that best suits your needs.",
        ),
        Post::new(
            "2022-09-03",
            "The magic of web workers in Javascript",
            "web-workers-js",
            &["javascript", "web workers"],
            "Unlock the potential of web workers to enhance the performance and responsiveness of your web applications.",
        ),
        Post::new(
            "2023-09-03",
            "Crafting a single-page application (SPA) with Javascript frameworks",
            "spa-javascript-frameworks",
            &["javascript", "SPA", "frameworks"],
            "Navigate the world of Javascript frameworks and select the perfect one to build your next SPA.",
        ),
        Post::new(
            "2024-09-03",
            "Securing your Javascript applications from vulnerabilities",
            "javascript-security",
            &["javascript", "security"],
            "Fortify your Javascript applications against common security threats and ensure a safe user experience.",
        ),
        Post::new(
            "2022-10-03",
            "The power of design patterns in Javascript",
            "design-patterns-js",
            &["javascript", "design patterns"],
            "Employ design patterns to structure your Javascript code effectively and promote maintainability.",
        ),
    ]
}
