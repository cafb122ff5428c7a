//! Canned reply templates
//!
//! Fixed markdown strings returned verbatim by the simulated responder.
//! The widget renders the markdown; fenced code blocks carry a language
//! tag so it can apply syntax highlighting.

pub const GREETING: &str = "Hello! 👋 I'm your AI assistant. How can I help you today?";

pub const CAPABILITIES: &str = r"I'm here to help! You can ask me about:

- **General questions** - I can answer various topics
- **Code examples** - I can provide code snippets
- **Explanations** - I can explain concepts in detail
- **Problem solving** - I can help troubleshoot issues

What would you like to know?";

pub const JAVASCRIPT_SAMPLE: &str = r"Here's a simple JavaScript example:

```javascript
function greet(name) {
  return `Hello, ${name}!`;
}

console.log(greet('World')); // Output: Hello, World!
```

This function takes a name parameter and returns a personalized greeting.";

pub const REACT_SAMPLE: &str = r#"Here's a simple React component example:

```jsx
import React from 'react';

function Welcome({ name }) {
  return (
    <div className="welcome">
      <h1>Hello, {name}!</h1>
      <p>Welcome to our React application.</p>
    </div>
  );
}

export default Welcome;
```

This component accepts a `name` prop and displays a welcome message."#;

pub const WEATHER: &str = r"I'd be happy to help with weather information! However, I don't have access to real-time weather data. You might want to check a weather service like:

- **Weather.com**
- **AccuWeather**
- **OpenWeatherMap**

Or you can ask me about other topics I can help with!";

pub const THANKS: &str =
    "You're welcome! 😊 I'm glad I could help. Feel free to ask me anything else!";

pub const FAREWELL: &str = "Goodbye! 👋 It was nice chatting with you. Come back anytime!";

pub const FALLBACK: &str = r"That's an interesting question! 🤔

I'm a demo chatbot, so my responses are limited. In a real application, I would connect to an AI service like:

- **OpenAI GPT**
- **Google Gemini**
- **Anthropic Claude**
- **Custom AI models**

For now, try asking me about:
- Hello/greetings
- Help
- Code examples
- React components
- Weather (I'll explain limitations)
- Thank you/goodbye";
